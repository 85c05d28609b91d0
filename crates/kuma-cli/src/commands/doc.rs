// crates/kuma-cli/src/commands/doc.rs - Document Commands

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, Utc};
use console::style;
use kuma_core::DocumentData;

use crate::cli::DocCommands;
use crate::context::Context;
use crate::services::EditorService;

pub async fn handle(ctx: &Context, cmd: DocCommands, json: bool) -> Result<()> {
    let db = ctx.database();

    match cmd {
        DocCommands::New {
            title,
            content,
            edit,
        } => {
            let content = match (content, edit) {
                (Some(content), false) => content,
                (initial, true) => EditorService::edit_text(
                    initial.as_deref().unwrap_or(&format!("# {}\n\n", title)),
                    &ctx.config().editor,
                )?,
                (None, false) => String::new(),
            };

            let doc = DocumentData::new(title, content);
            db.save_document(&doc).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("✅ Created document: {}", doc.id);
            }
        }

        DocCommands::Show { id } => {
            let doc = find(&db, &id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
                return Ok(());
            }

            println!("📄 {}", style(&doc.title).bold());
            println!("{}", "─".repeat(50));
            println!("{}", doc.content);

            // Links to images that are not in the store
            for image in doc.image_refs() {
                if db.get_image_meta(&image).await?.is_none() {
                    eprintln!("⚠️ Missing image: {}", image);
                }
            }
        }

        DocCommands::Edit { id } => {
            let mut doc = find(&db, &id).await?;
            let content = EditorService::edit_text(&doc.content, &ctx.config().editor)?;

            if content == doc.content {
                println!("No changes to {}", doc.id);
                return Ok(());
            }

            doc.content = content;
            doc.updated_at = Utc::now().timestamp_millis();
            db.save_document(&doc).await?;
            println!("✅ Saved document: {}", doc.id);
        }

        DocCommands::List => {
            let docs = db.list_documents().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&docs)?);
                return Ok(());
            }

            for doc in docs {
                println!(
                    "{}  {}  {}",
                    style(&doc.id).dim(),
                    style(format_millis(doc.updated_at)).dim(),
                    doc.title
                );
            }
        }
    }

    Ok(())
}

async fn find(db: &kuma_core::Database, id: &str) -> Result<DocumentData> {
    db.get_document(id)
        .await?
        .ok_or_else(|| anyhow!("No document found with id: {}", id))
}

fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
