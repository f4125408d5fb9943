/// Flavour of a legacy tool whose flags differ between BSD and GNU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Bsd,
    Gnu,
}

impl Dialect {
    /// Parse a mode string, falling back to the host's native dialect
    #[must_use]
    pub fn from_mode(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("bsd") {
            Self::Bsd
        } else if mode.eq_ignore_ascii_case("gnu") {
            Self::Gnu
        } else {
            Self::detect()
        }
    }

    /// Dialect of the userland shipped with the current operating system
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(any(
            target_os = "macos",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            Self::Bsd
        } else {
            Self::Gnu
        }
    }
}
