use crate::app::command_support::{load_settings, state_root};
use crate::web::{serve, AppEnv};

pub fn cmd_serve(args: &[String]) -> Result<String, String> {
    let mut settings = load_settings()?;
    match args {
        [] => {}
        [flag, addr] if flag == "--bind" => {
            settings.bind_address = addr.clone();
        }
        _ => return Err("usage: serve [--bind <addr:port>]".to_string()),
    }
    let addr = settings.socket_addr().map_err(|e| e.to_string())?;
    let root = state_root()?;
    let env = AppEnv::from_settings(&settings, &root).map_err(|e| e.to_string())?;
    env.log.info(
        "server.start.requested",
        &format!("tenant={} addr={addr}", settings.tenant_id),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime
        .block_on(serve(env, addr))
        .map_err(|e| e.to_string())?;

    Ok(format!("stopped\naddr={addr}"))
}
