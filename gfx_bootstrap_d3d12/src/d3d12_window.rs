/// NativeWindow - plain Win32 window used as a swap-chain target
///
/// Registers a window class once per process, creates a `WS_OVERLAPPEDWINDOW`
/// sized so the client area matches the requested size, and pumps messages
/// until the window is destroyed.

use gfx_bootstrap::gfxboot::{Error, Result};
use gfx_bootstrap::{gfx_debug, gfx_err};
use raw_window_handle::{
    HandleError, HasWindowHandle, RawWindowHandle, Win32WindowHandle, WindowHandle,
};
use std::num::NonZeroIsize;
use std::sync::atomic::{AtomicBool, Ordering};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{BOOL, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, EndPaint, FillRect, UpdateWindow, COLOR_WINDOW, HBRUSH, PAINTSTRUCT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::d3d12_backend::Hwnd;
use crate::d3d12_error::{driver_error, SOURCE};

const CLASS_NAME: &str = "GfxBootstrapWindow";

/// Window origin on the desktop
const WINDOW_X: i32 = 100;
const WINDOW_Y: i32 = 100;

static CLASS_REGISTERED: AtomicBool = AtomicBool::new(false);

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Top-level Win32 window
pub struct NativeWindow {
    hwnd: HWND,
    instance: HINSTANCE,
    width: u32,
    height: u32,
}

impl NativeWindow {
    /// Create and show a window whose client area is `width` x `height`
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` when the class cannot be registered,
    /// `Error::DriverError` when window creation fails.
    pub fn create(title: &str, width: u32, height: u32) -> Result<Self> {
        let instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
            .map_err(|e| driver_error("GetModuleHandleW", &e))?
            .into();
        let class_name = wide(CLASS_NAME);

        if !CLASS_REGISTERED.swap(true, Ordering::SeqCst) {
            let class = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_CLASSDC,
                lpfnWndProc: Some(window_proc),
                hInstance: instance,
                hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };

            if unsafe { RegisterClassExW(&class) } == 0 {
                CLASS_REGISTERED.store(false, Ordering::SeqCst);
                return Err(Error::InitializationFailed(format!(
                    "RegisterClassExW failed for window class {}",
                    CLASS_NAME
                )));
            }
        }

        let mut rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        unsafe { AdjustWindowRect(&mut rect, WS_OVERLAPPEDWINDOW, BOOL(0)) }
            .map_err(|e| driver_error("AdjustWindowRect", &e))?;

        let title = wide(title);
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                WINDOW_X,
                WINDOW_Y,
                rect.right - rect.left,
                rect.bottom - rect.top,
                None,
                None,
                instance,
                None,
            )
        }
        .map_err(|e| driver_error("CreateWindowExW", &e))?;

        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOWDEFAULT);
            let _ = UpdateWindow(hwnd);
        }
        gfx_debug!(SOURCE, "Window created ({}x{} client area)", width, height);

        Ok(Self {
            hwnd,
            instance,
            width,
            height,
        })
    }

    /// Handle to pass to the bootstrapper
    pub fn hwnd(&self) -> Hwnd {
        Hwnd(self.hwnd)
    }

    pub fn client_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Dispatch messages until the window is closed
    ///
    /// Returns the exit code posted with `WM_QUIT`.
    pub fn run_message_loop(&self) -> Result<i32> {
        let mut msg = MSG::default();
        loop {
            let status = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            match status.0 {
                0 => return Ok(msg.wParam.0 as i32),
                -1 => return Err(gfx_err!(SOURCE, "GetMessageW failed")),
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        unsafe {
            if IsWindow(self.hwnd).as_bool() {
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }
}

impl HasWindowHandle for NativeWindow {
    fn window_handle(&self) -> std::result::Result<WindowHandle<'_>, HandleError> {
        let hwnd = NonZeroIsize::new(self.hwnd.0 as isize).ok_or(HandleError::Unavailable)?;
        let mut handle = Win32WindowHandle::new(hwnd);
        handle.hinstance = NonZeroIsize::new(self.instance.0 as isize);
        Ok(unsafe { WindowHandle::borrow_raw(RawWindowHandle::Win32(handle)) })
    }
}

extern "system" fn window_proc(hwnd: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match message {
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            WM_PAINT => {
                let mut paint = PAINTSTRUCT::default();
                let hdc = BeginPaint(hwnd, &mut paint);
                FillRect(hdc, &paint.rcPaint, HBRUSH((COLOR_WINDOW.0 + 1) as isize as *mut _));
                let _ = EndPaint(hwnd, &paint);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, message, wparam, lparam),
        }
    }
}
