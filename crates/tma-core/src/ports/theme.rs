use crate::launch::ColorScheme;

/// Light/dark preference of the surrounding environment, used when no
/// bridge reports a scheme.
pub trait SystemThemePort {
    fn preferred_scheme(&self) -> ColorScheme;
}
