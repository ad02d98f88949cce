/// HRESULT failure mapping

use gfx_bootstrap::gfx_error;
use gfx_bootstrap::gfxboot::Error;
use windows::Win32::Foundation::E_OUTOFMEMORY;

pub(crate) const SOURCE: &str = "gfxboot::d3d12";

/// Convert a failed driver call into an `Error`
///
/// Logs the entry point, the HRESULT and the system message text.
/// `E_OUTOFMEMORY` becomes `Error::OutOfMemory`; everything else keeps the code.
pub(crate) fn driver_error(call: &str, error: &windows::core::Error) -> Error {
    let code = error.code();
    let message = error.message().to_string();
    gfx_error!(SOURCE, "{} failed with 0x{:08X}: {}", call, code.0 as u32, message);

    if code == E_OUTOFMEMORY {
        return Error::OutOfMemory;
    }
    Error::DriverError {
        call: call.to_string(),
        code: code.0,
        message,
    }
}
