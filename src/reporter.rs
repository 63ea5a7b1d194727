use crate::{
    grouping::group_by_cortex,
    models::{AnalyzerRecord, CortexModule, ResponderRecord},
};
use std::io::{self, Write};

/// Renders analyzer and responder listings as plain text.
pub struct Reporter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> Reporter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    pub fn print_analyzers(&mut self, analyzers: Vec<AnalyzerRecord>) -> io::Result<()> {
        writeln!(self.out, "\n=== {} AVAILABLE CORTEX ANALYZERS ===", analyzers.len())?;

        for group in group_by_cortex(analyzers) {
            writeln!(self.out, "\n== Cortex Instance: {} ==", group.cortex_id)?;

            for analyzer in &group.records {
                writeln!(self.out, "- {} (ID: {})", analyzer.display_name(), analyzer.display_id())?;
                writeln!(
                    self.out,
                    "  Supported data types: {}",
                    analyzer.data_type_list.join(", ")
                )?;
            }
        }

        Ok(())
    }

    pub fn print_responders(&mut self, responders: Vec<ResponderRecord>) -> io::Result<()> {
        if responders.is_empty() {
            return writeln!(self.out, "No responders available for this entity.");
        }

        writeln!(self.out, "\n=== {} AVAILABLE RESPONDERS ===", responders.len())?;

        for group in group_by_cortex(responders) {
            writeln!(self.out, "\nCortex Instance: {}", group.cortex_id)?;

            for responder in &group.records {
                writeln!(self.out, "- {} (ID: {})", responder.display_name(), responder.display_id())?;
                if let Some(description) = responder.description() {
                    writeln!(self.out, "  Description: {}", description)?;
                }
            }
        }

        Ok(())
    }
}
