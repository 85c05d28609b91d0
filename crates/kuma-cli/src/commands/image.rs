// crates/kuma-cli/src/commands/image.rs - Image Commands
//
// Images are insert-only: `add` always creates a new id, and there is no
// way to replace the bytes behind an existing one.

use anyhow::{Result, anyhow};
use kuma_core::db::image_link;

use crate::cli::ImageCommands;
use crate::context::Context;

pub async fn handle(ctx: &Context, cmd: ImageCommands, json: bool) -> Result<()> {
    let db = ctx.database();

    match cmd {
        ImageCommands::Add { file } => {
            let bytes = crate::stdin::read_bytes_or_stdin(file.as_deref())?;
            let id = db.save_image(&bytes).await?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({ "id": id, "link": image_link(&id), "size": bytes.len() })
                );
            } else {
                println!("{}", id);
                println!("{}", image_link(&id));
            }
        }

        ImageCommands::Export { id, output } => {
            let bytes = db
                .get_image(&id)
                .await?
                .ok_or_else(|| anyhow!("No image found with id: {}", id))?;

            ctx.workspace_service.write_file(&output, &bytes)?;
            println!("✅ Exported {} ({} bytes) to {}", id, bytes.len(), output.display());
        }
    }

    Ok(())
}
