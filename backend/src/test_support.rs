//! Test utilities shared by unit tests in `src/`.
//!
//! Only compiled for tests.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls; these helpers give test
    //! suites the same `cap_std::fs::Dir` based access the asset store uses.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file, creating parent directories.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod clock {
    //! Controllable clock for service tests.

    use std::sync::Mutex;

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use mockable::Clock;

    /// Clock that reports a fixed instant until advanced.
    pub struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        /// Clock frozen at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Clock frozen at 2025-01-09T08:30:00Z.
        pub fn standard() -> Self {
            let now = Utc
                .with_ymd_and_hms(2025, 1, 9, 8, 30, 0)
                .single()
                .expect("valid fixed timestamp");
            Self::new(now)
        }

        /// Move the clock forward.
        pub fn advance(&self, delta: Duration) {
            let mut guard = self.0.lock().expect("clock mutex poisoned");
            *guard += delta;
        }
    }

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex poisoned")
        }
    }
}
