use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::display::HeaderDisplay;

/// Quick cart header rendered to the terminal, one line per update.
#[derive(Default)]
pub struct TerminalHeader;

impl HeaderDisplay for TerminalHeader {
    fn set_item_count(&self, text: &str) -> Result<(), BasketSyncError> {
        println!("  Quick cart items: {text}");
        Ok(())
    }

    fn set_total_value(&self, text: &str) -> Result<(), BasketSyncError> {
        println!("  Quick cart total: {text}");
        Ok(())
    }
}
