use std::path::Path;

use anyhow::{bail, Context, Result};

use folio::blueprint::check_dir;

pub fn cmd_check(dir: &Path) -> Result<()> {
    let entries = check_dir(dir)
        .with_context(|| format!("failed to read blueprints in {}", dir.display()))?;

    let mut failed = 0;
    for entry in &entries {
        match &entry.result {
            Ok(id) => println!("✓ {} ({})", entry.path.display(), id),
            Err(err) => {
                failed += 1;
                println!("✗ {}: {}", entry.path.display(), err);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} blueprints failed validation", entries.len());
    }
    println!("\n{} blueprints OK", entries.len());
    Ok(())
}
