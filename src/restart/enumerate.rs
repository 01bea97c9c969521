//! Open folder window enumeration feature.

use crate::error::Result;
use crate::path_decoder::url_to_path;
use std::path::PathBuf;

/// A connected view of the shell's open window collection.
///
/// Dropping it releases every reference taken from the shell, including any
/// runtime context the connection set up.
pub trait ShellWindows {
    /// Number of windows the shell currently reports.
    fn count(&self) -> Result<usize>;

    /// Location URL of the window at `index`.
    ///
    /// `Ok(None)` means the window has no location capability at all (a
    /// virtual view). That is normal, not an error.
    fn location_url(&self, index: usize) -> Result<Option<String>>;
}

/// Something that can reach the live shell window collection.
pub trait ShellWindowsConnector {
    fn connect(&self) -> Result<Box<dyn ShellWindows + '_>>;
}

/// Connect to the shell and collect the paths of every open folder window.
///
/// An unreachable shell yields an empty list. The connection (and whatever it
/// holds) is released before this returns.
pub fn open_folder_paths<C: ShellWindowsConnector + ?Sized>(connector: &C) -> Vec<PathBuf> {
    match connector.connect() {
        Ok(windows) => collect_open_folders(windows.as_ref()),
        Err(e) => {
            log::debug!("Skipping folder capture: {}", e);
            Vec::new()
        }
    }
}

/// Collect the native paths of all windows whose location is a local-file URL.
///
/// Order follows the shell's enumeration order. Duplicates are kept.
pub fn collect_open_folders<W: ShellWindows + ?Sized>(windows: &W) -> Vec<PathBuf> {
    let count = match windows.count() {
        Ok(count) => count,
        Err(e) => {
            log::debug!("Skipping folder capture: {}", e);
            return Vec::new();
        }
    };

    let mut paths = Vec::new();
    for index in 0..count {
        match windows.location_url(index) {
            Ok(Some(url)) => match url_to_path(&url) {
                Some(path) => {
                    log::trace!("Window {} -> {}", index, path);
                    paths.push(PathBuf::from(path));
                }
                None => log::trace!("Window {} is virtual ({})", index, url),
            },
            Ok(None) => log::trace!("Window {} has no location", index),
            Err(e) => log::debug!("{}", e),
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    enum Slot {
        Url(&'static str),
        NoLocation,
        Broken,
    }

    struct FakeWindows {
        slots: Vec<Slot>,
        count_fails: bool,
    }

    impl ShellWindows for FakeWindows {
        fn count(&self) -> Result<usize> {
            if self.count_fails {
                return Err(ShellError::WindowsUnavailable("count".into()));
            }
            Ok(self.slots.len())
        }

        fn location_url(&self, index: usize) -> Result<Option<String>> {
            match &self.slots[index] {
                Slot::Url(url) => Ok(Some(url.to_string())),
                Slot::NoLocation => Ok(None),
                Slot::Broken => Err(ShellError::WindowLocation {
                    index,
                    reason: "gone".into(),
                }),
            }
        }
    }

    fn windows(slots: Vec<Slot>) -> FakeWindows {
        FakeWindows {
            slots,
            count_fails: false,
        }
    }

    #[test]
    fn test_collects_file_windows_in_order() {
        let w = windows(vec![
            Slot::Url("file:///C:/Projects"),
            Slot::Url("file:///D:/Music%20Library"),
        ]);
        assert_eq!(
            collect_open_folders(&w),
            vec![PathBuf::from(r"C:\Projects"), PathBuf::from(r"D:\Music Library")]
        );
    }

    #[test]
    fn test_skips_virtual_and_unreadable_windows() {
        let w = windows(vec![
            Slot::NoLocation,
            Slot::Url("file:///C:/Temp"),
            Slot::Url("about:blank"),
            Slot::Broken,
            Slot::Url(""),
            Slot::Url("file:///"),
            Slot::Url("file:///C:/Users"),
        ]);
        assert_eq!(
            collect_open_folders(&w),
            vec![PathBuf::from(r"C:\Temp"), PathBuf::from(r"C:\Users")]
        );
    }

    #[test]
    fn test_keeps_duplicates() {
        let w = windows(vec![
            Slot::Url("file:///C:/Temp"),
            Slot::Url("file:///C:/Temp"),
        ]);
        assert_eq!(collect_open_folders(&w).len(), 2);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let w = windows(vec![
            Slot::Url("file:///C:/A"),
            Slot::NoLocation,
            Slot::Url("file:///C:/B"),
        ]);
        assert_eq!(collect_open_folders(&w), collect_open_folders(&w));
    }

    #[test]
    fn test_unreadable_count_is_empty() {
        let w = FakeWindows {
            slots: vec![Slot::Url("file:///C:/A")],
            count_fails: true,
        };
        assert!(collect_open_folders(&w).is_empty());
    }

    struct Unreachable;

    impl ShellWindowsConnector for Unreachable {
        fn connect(&self) -> Result<Box<dyn ShellWindows + '_>> {
            Err(ShellError::WindowsUnavailable("no shell".into()))
        }
    }

    #[test]
    fn test_unreachable_shell_is_empty() {
        assert!(open_folder_paths(&Unreachable).is_empty());
    }
}
