use std::path::Path;

use colored::Colorize;

use aa_session::question;

pub fn run(state: &Path, id: &str) -> Result<(), String> {
    let q = question::find(id).ok_or_else(|| format!("unknown question: {id}"))?;
    super::open_store(state).save_selected_question_id(q.id);

    println!("  {} {}", "Question".bold(), q.number());
    println!("  {}", q.text);
    Ok(())
}
