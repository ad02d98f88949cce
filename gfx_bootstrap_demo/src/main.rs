//! Bootstrap demo
//!
//! Opens a window, brings Direct3D 12 up to the point where it can accept
//! render commands, logs what was created and waits for the window to close.

use gfx_bootstrap::gfxboot::BootstrapConfig;
use gfx_bootstrap::gfx_error;

const SOURCE: &str = "gfxboot::Demo";

#[cfg(windows)]
fn run(config: BootstrapConfig) -> gfx_bootstrap::gfxboot::Result<i32> {
    use gfx_bootstrap::gfx_info;
    use gfx_bootstrap::gfxboot::{Backend, Bootstrapper, Device, SwapChain};
    use gfx_bootstrap_d3d12::gfxboot::{D3D12Backend, NativeWindow};

    let window = NativeWindow::create(&config.window_title, config.width, config.height)?;
    let context = Bootstrapper::new(D3D12Backend::new(), config)?.run(window.hwnd())?;

    let desc = context.swap_chain().desc();
    gfx_info!(
        SOURCE,
        "{} device ready: feature level {}, {:?} adapter",
        context.backend().name(),
        context.device().feature_level(),
        context.adapter_kind()
    );
    gfx_info!(
        SOURCE,
        "Swap chain: {}x{} {:?}, {} buffer(s), {} sample(s), {} quality level(s) available",
        desc.width,
        desc.height,
        desc.format,
        context.back_buffer_count(),
        desc.sample_desc.count,
        context.multisample().quality_levels
    );
    gfx_info!(
        SOURCE,
        "Current back buffer {} -> RTV 0x{:X}",
        context.swap_chain().current_back_buffer_index(),
        context.current_back_buffer_view()?.ptr
    );

    let exit_code = window.run_message_loop()?;

    // Release the context before the window it presents to
    drop(context);

    #[cfg(feature = "d3d12-info-queue")]
    gfx_bootstrap_d3d12::print_validation_stats_report();

    Ok(exit_code)
}

#[cfg(not(windows))]
fn run(_config: BootstrapConfig) -> gfx_bootstrap::gfxboot::Result<i32> {
    Err(gfx_bootstrap::gfxboot::Error::InitializationFailed(
        "Direct3D 12 is only available on Windows".to_string(),
    ))
}

fn main() {
    let config = BootstrapConfig::default();

    match run(config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            gfx_error!(SOURCE, "{}", e);
            std::process::exit(1);
        }
    }
}
