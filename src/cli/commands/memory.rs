//! Memory command implementation.

use crate::cli::{MemoryAction, Output};
use crate::config::Settings;
use crate::memory::{FactStore, FileFactStore};
use anyhow::{bail, Result};

/// Run the memory command.
pub async fn run_memory(action: &MemoryAction, settings: &Settings) -> Result<()> {
    let path = settings.memory_path();

    match action {
        MemoryAction::Show => {
            let store = FileFactStore::open(&path).await?;
            print!("{}", store.load().await?);
        }

        MemoryAction::Add { fact } => {
            let fact = fact.trim();
            if fact.is_empty() {
                bail!("Refusing to save an empty fact");
            }
            let store = FileFactStore::open(&path).await?;
            store.append(fact).await?;
            Output::success(&format!("Saved to {}", store.location()));
        }

        MemoryAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
