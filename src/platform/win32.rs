//! Win32 bindings: COM shell windows, Toolhelp32 process snapshot,
//! forced termination and the `open` verb.

use super::SystemShell;
use crate::error::{Result, ShellError};
use crate::restart::{
    FolderOpener, ProcessControl, ProcessEntry, ShellWindows, ShellWindowsConnector,
    TerminateOutcome,
};
use std::path::Path;
use std::time::Duration;
use windows::core::{w, Interface, HSTRING, PCWSTR, VARIANT};
use windows::Win32::Foundation::{CloseHandle, FALSE, HANDLE, HWND, WAIT_OBJECT_0};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
    COINIT_DISABLE_OLE1DDE,
};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{
    OpenProcess, TerminateProcess, WaitForSingleObject, PROCESS_SYNCHRONIZE, PROCESS_TERMINATE,
};
use windows::Win32::UI::Shell::{
    IShellWindows, IWebBrowserApp, ShellExecuteW, ShellWindows as CLSID_SHELL_WINDOWS,
};
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

/// COM apartment for the current thread, torn down on drop.
struct ComApartment {
    initialized: bool,
}

impl ComApartment {
    fn enter() -> Self {
        // S_FALSE (already initialised) still has to be balanced
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        Self {
            initialized: hr.is_ok(),
        }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// The shell's window collection plus the apartment it lives in.
///
/// Field order matters: `windows` is released before the apartment goes away.
struct ComShellWindows {
    windows: IShellWindows,
    _apartment: ComApartment,
}

impl ShellWindows for ComShellWindows {
    fn count(&self) -> Result<usize> {
        let count = unsafe { self.windows.Count() }
            .map_err(|e| ShellError::WindowsUnavailable(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn location_url(&self, index: usize) -> Result<Option<String>> {
        let location_err = |e: windows::core::Error| ShellError::WindowLocation {
            index,
            reason: e.to_string(),
        };

        let slot = VARIANT::from(index as i32);
        let dispatch = unsafe { self.windows.Item(&slot) }.map_err(location_err)?;

        // Windows that are not browser-like have no location at all
        let Ok(browser) = dispatch.cast::<IWebBrowserApp>() else {
            return Ok(None);
        };

        let url = unsafe { browser.LocationURL() }.map_err(location_err)?;
        Ok(Some(url.to_string()))
    }
}

impl ShellWindowsConnector for SystemShell {
    fn connect(&self) -> Result<Box<dyn ShellWindows + '_>> {
        let apartment = ComApartment::enter();
        let windows: IShellWindows =
            unsafe { CoCreateInstance(&CLSID_SHELL_WINDOWS, None, CLSCTX_ALL) }
                .map_err(|e| ShellError::WindowsUnavailable(e.to_string()))?;

        Ok(Box::new(ComShellWindows {
            windows,
            _apartment: apartment,
        }))
    }
}

/// Closes a kernel handle on drop.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Convert a NUL-terminated UTF-16 buffer to a String.
fn wide_to_string(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// Clamp a timeout to a finite Win32 wait in milliseconds.
fn wait_millis(timeout: Duration) -> u32 {
    // u32::MAX is INFINITE
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX - 1).min(u32::MAX - 1)
}

impl ProcessControl for SystemShell {
    fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map_err(|e| ShellError::Snapshot(e.to_string()))?;
        let snapshot = HandleGuard(snapshot);

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut processes = Vec::new();
        if unsafe { Process32FirstW(snapshot.0, &mut entry) }.is_err() {
            return Ok(processes);
        }
        loop {
            processes.push(ProcessEntry {
                pid: entry.th32ProcessID,
                exe_name: wide_to_string(&entry.szExeFile),
            });
            if unsafe { Process32NextW(snapshot.0, &mut entry) }.is_err() {
                break;
            }
        }

        Ok(processes)
    }

    fn terminate(&self, pid: u32, timeout: Duration) -> Result<TerminateOutcome> {
        let handle = unsafe { OpenProcess(PROCESS_TERMINATE | PROCESS_SYNCHRONIZE, FALSE, pid) }
            .map_err(|e| ShellError::OpenProcess {
                pid,
                reason: e.to_string(),
            })?;
        let handle = HandleGuard(handle);

        unsafe { TerminateProcess(handle.0, 0) }.map_err(|e| ShellError::Terminate {
            pid,
            reason: e.to_string(),
        })?;

        let wait = unsafe { WaitForSingleObject(handle.0, wait_millis(timeout)) };
        if wait == WAIT_OBJECT_0 {
            Ok(TerminateOutcome::Exited)
        } else {
            Ok(TerminateOutcome::TimedOut)
        }
    }
}

impl FolderOpener for SystemShell {
    fn open(&self, path: &Path) -> Result<()> {
        let file = HSTRING::from(path);
        let instance = unsafe {
            ShellExecuteW(
                HWND::default(),
                w!("open"),
                &file,
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };

        // ShellExecute reports success with any value above 32
        let code = instance.0 as isize;
        if code > 32 {
            Ok(())
        } else {
            Err(ShellError::OpenFolder {
                path: path.to_path_buf(),
                reason: format!("ShellExecute returned {}", code),
            })
        }
    }
}
