use std::io::{BufRead, Write};

use unwind_core::{ActiveTool, Navigator, Tool};

/// Ask each grounding step in turn. A blank line or end of input skips.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut nav = Navigator::default();
    nav.open(Tool::Grounding)?;
    let Some(ActiveTool::Grounding(seq)) = nav.active_mut() else {
        return Err("grounding did not open".into());
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    while !seq.is_finished() {
        let step = seq.current_step();
        write!(stdout, "{} ({}): ", step.prompt(), step.placeholder)?;
        stdout.flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        seq.advance(Some(answer.trim()));
    }

    writeln!(stdout)?;
    writeln!(stdout, "You did it. Take a moment to notice how you feel now.")?;
    for (prompt, answer) in seq.summary() {
        writeln!(stdout, "  {prompt}: {answer}")?;
    }
    Ok(())
}
