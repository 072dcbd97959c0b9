use unwind_core::{ActiveTool, Navigator, Tool};

pub fn run(seed: Option<u64>, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut nav = Navigator::default().with_prompt_seed(seed);
    nav.open(Tool::Prompts)?;
    let Some(ActiveTool::Prompts(deck)) = nav.active_mut() else {
        return Err("reframe prompts did not open".into());
    };

    for i in 0..count {
        if i > 0 {
            deck.shuffle();
        }
        println!("{}", deck.current());
    }
    Ok(())
}
