//! Example: sort line items against an in-memory gateway.
//!
//! Loads four records, resizes a column, drags the last row to the top and
//! saves. Run with: `cargo run -p sorter-lib --example in_memory`

use std::sync::Arc;

use simplelog::{Config, LevelFilter, SimpleLogger};
use sorter_lib::gateway::{ChildTable, InMemoryGateway};
use sorter_lib::model::SourceRecord;
use sorter_lib::notify::ToastQueue;
use sorter_lib::{EditorConfig, EditorState, ListEditor};

fn print_table(state: &EditorState) {
    println!("== {} ==", state.card_title());
    let header: Vec<String> = state
        .columns
        .iter()
        .map(|c| format!("{} ({}px)", c.label, c.width_px))
        .collect();
    println!("#  | {}", header.join(" | "));
    for row in &state.rows {
        let cells: Vec<String> = row.cells.iter().map(|c| c.value.display()).collect();
        println!("{:<2} | {}", row.display_order, cells.join(" | "));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let mut table = ChildTable::new("Line Item")
        .field_label("Name", "Item")
        .field_label("Product__r.Name", "Product");
    for (idx, (name, product)) in [("Bolt", "Fasteners"), ("Nut", "Fasteners"), ("Hinge", "Hardware"), ("Gasket", "Seals")]
        .into_iter()
        .enumerate()
    {
        table = table.record(
            SourceRecord::with_id(format!("a0B{idx}"))
                .set("Quote__c", "q-100")
                .set("Name", name)
                .set("Sort_Order__c", i64::try_from(idx + 1)?)
                .set("Product__r", SourceRecord::new().set("Name", product)),
        );
    }
    let gateway = Arc::new(InMemoryGateway::new().with_table("Line_Item__c", table));

    let config = EditorConfig::new()
        .with_parent_id("q-100")
        .with_child_type_name("Line_Item__c")
        .with_parent_link_field_name("Quote__c")
        .with_order_field_name("Sort_Order__c")
        .with_display_fields_csv("Name,Product__r.Name");

    let toasts = Arc::new(ToastQueue::new());
    let editor = ListEditor::new(config, gateway, toasts.clone());

    editor.load().await?;
    print_table(&editor.state());

    editor.resize_start(0, 300);
    editor.resize_move(360);
    editor.resize_end();

    editor.drag_start(3);
    editor.drag_over();
    editor.drop_at(0);

    editor.save().await?;
    for toast in toasts.drain() {
        println!("[{}] {}: {}", toast.severity.as_str(), toast.title, toast.message);
    }
    print_table(&editor.state());

    Ok(())
}
