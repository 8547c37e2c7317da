use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use aa_session::question::{self, PREVIEW_CHARS};

pub fn run(state: &Path) -> Result<(), String> {
    let selected = super::open_store(state).selected_question_id();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "ID", "Question"]);
    for q in question::all() {
        let marker = if selected.as_deref() == Some(q.id) { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            q.id.to_string(),
            format!("{}. {}", q.number(), q.preview(PREVIEW_CHARS)),
        ]);
    }

    println!("{table}");
    Ok(())
}
