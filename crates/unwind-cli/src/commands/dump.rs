use std::io::Read;
use std::path::PathBuf;

use chrono::Utc;
use unwind_core::{ActiveTool, Config, Navigator, Tool};

pub fn run(save: bool, dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let mut nav = Navigator::default();
    nav.open(Tool::Dump)?;
    let Some(ActiveTool::Dump(dump)) = nav.active_mut() else {
        return Err("thought dump did not open".into());
    };
    dump.set_text(text);

    if !dump.can_submit() {
        println!("Nothing written.");
        return Ok(());
    }

    if save {
        let dir = match dir {
            Some(d) => d,
            None => Config::load()?.export_dir(),
        };
        if let Some((path, _)) = dump.save_to(&dir, Utc::now().date_naive())? {
            println!("Saved to {}", path.display());
        }
    } else if dump.release().is_some() {
        println!("Released. Let it go.");
    }
    Ok(())
}
