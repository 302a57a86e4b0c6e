use anyhow::Result;
use ws_core::WsError;
use ws_store::StoreError;
use ws_workspace::Ide;

use super::CommandContext;

pub fn set_ide(
    ctx: &CommandContext,
    id: &str,
    ide: &str,
    options: Vec<(String, String)>,
) -> Result<()> {
    let ide: Ide = ide.parse()?;

    let updated = ctx
        .store
        .update(&ctx.key(id), &mut |workspace| {
            workspace.ide.ide = Some(ide.clone());
            for (key, value) in &options {
                workspace.ide.options.insert(key.clone(), value.clone());
            }
            Ok(())
        })
        .map_err(WsError::from)?;

    println!("Workspace '{}' now uses {}", updated.id, updated.ide_name());
    Ok(())
}

pub fn delete(ctx: &CommandContext, id: &str) -> Result<()> {
    let key = ctx.key(id);

    match ctx.store.load(&key) {
        Ok(workspace) if workspace.server.should_auto_delete() => {
            tracing::info!(
                server_id = %workspace.server.id,
                "workspace server is marked for deletion by the provider"
            );
        }
        Ok(_) => {}
        Err(e @ StoreError::InvalidFormat { .. }) => {
            tracing::warn!(workspace = %key, error = %e, "deleting unreadable workspace record");
        }
        Err(e) => return Err(WsError::from(e).into()),
    }

    ctx.store.delete(&key)?;
    println!("Deleted workspace '{}' ({})", id, ctx.context);
    Ok(())
}
