//! Theme listing command handler.

use std::path::Path;
use taleweaver::{ThemeCatalog, TaleweaverResult};

/// Handle the `themes` command
pub fn handle_themes(path: Option<&Path>) -> TaleweaverResult<()> {
    let catalog = match path {
        Some(path) => ThemeCatalog::from_file(path)?,
        None => ThemeCatalog::builtin(),
    };

    println!("\nAvailable themes:");
    println!("{:-<80}", "");
    for template in catalog.iter() {
        println!(
            "{:<10} {} ({} pages)",
            template.theme(),
            template.title(),
            template.scenarios().len()
        );
    }
    Ok(())
}
