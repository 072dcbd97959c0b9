use unwind_core::Tool;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for (i, tool) in Tool::ALL.iter().enumerate() {
        let id = serde_json::to_value(tool)?;
        println!(
            "{}. {:<11} [{}] {}",
            i + 1,
            tool.title(),
            id.as_str().unwrap_or_default(),
            tool.description()
        );
    }
    Ok(())
}
