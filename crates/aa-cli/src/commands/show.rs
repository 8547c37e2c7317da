use std::path::Path;

use colored::Colorize;

use aa_session::question;

pub fn run(state: &Path) -> Result<(), String> {
    let store = super::open_store(state);

    match store.selected_question_id().as_deref().and_then(question::find) {
        Some(q) => {
            println!("  {} {}", "Question".bold(), q.number());
            println!("  {}", q.text);
        }
        None => println!("  {}", "No question selected.".dimmed()),
    }

    if let Some(anchor) = store.last_anchor() {
        println!("  {} {anchor}", "Last anchor:".bold());
    }
    match store.last_result() {
        Some(result) => super::print_result(&result),
        None => println!("  {}", "No roll yet.".dimmed()),
    }
    Ok(())
}
