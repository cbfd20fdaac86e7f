use crate::commands::{load_environment, prompts};
use crate::output::Output;
use color_eyre::Result;
use watchlog_store::open_store;

pub fn run_delete(id: &str, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        let confirmed = prompts::prompt_yes_no(&format!("Delete entry {}?", id), Some(false))?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    let (config, paths) = load_environment()?;
    let store = open_store(&config, &paths);
    store.delete(id)?;

    output.success(format!("Deleted entry {}", id));
    Ok(())
}
