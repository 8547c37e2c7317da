use std::path::Path;

pub fn run(state: &Path) -> Result<(), String> {
    super::open_store(state).clear();
    println!("  Session state cleared.");
    Ok(())
}
