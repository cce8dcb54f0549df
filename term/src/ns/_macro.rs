/// Create a "namespace module"
/// defining a set of IRI constants sharing a prefix.
///
/// # Tests
/// This macro also creates a test module checking that all created IRIs are valid.
macro_rules! namespace {
    ($iri_prefix:literal, $($suffix:ident),*; $($r_id:ident, $r_sf:literal),*) => {
        /// Prefix used in this namespace.
        pub const PREFIX: &str = $iri_prefix;
        $(
            /// Generated term.
            #[allow(non_upper_case_globals)]
            pub const $suffix: &str = concat!($iri_prefix, stringify!($suffix));
        )*
        $(
            /// Generated term.
            #[allow(non_upper_case_globals)]
            pub const $r_id: &str = concat!($iri_prefix, $r_sf);
        )*

    };
    ($iri_prefix:literal, $($suffix:ident),*) => {
        namespace!($iri_prefix, $($suffix),*;);
    };
}
