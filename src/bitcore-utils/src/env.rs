//! Build-time configuration through environment variables.
//!
//! Each macro takes the name of the variable, a default value, and a short description of what the
//! value configures (only used as documentation at the call site). The expansion is a constant
//! expression, so values can be used to initialize `const` and `static` items. A value that does not
//! parse fails the build.

pub use {const_panic, konst};

macro_rules! define_env_with_default_macro {
    ($macro_name:ident, $parse_fn_name:ident, $output_type_name:literal) => {
        #[macro_export]
        macro_rules! $macro_name {
            ($env_var:literal, $default:expr, $doc:literal) => {
                if let Some(str_value) = option_env!($env_var) {
                    if let Ok(value) = $crate::env::konst::primitive::$parse_fn_name(str_value) {
                        value
                    } else {
                        $crate::env::const_panic::concat_panic!(
                            "Could not parse environment variable `",
                            $env_var,
                            "=",
                            str_value,
                            "` as ",
                            $output_type_name,
                            " (",
                            $doc,
                            ")",
                        );
                    }
                } else {
                    $default
                }
            };
        }
    };
}

define_env_with_default_macro!(u32_from_env_or, parse_u32, "a u32");

/// Reads a string from an environment variable at build time, falling back to `$default`.
#[macro_export]
macro_rules! str_from_env_or {
    ($env_var:literal, $default:expr, $doc:literal) => {
        if let Some(str_value) = option_env!($env_var) {
            str_value
        } else {
            $default
        }
    };
}
