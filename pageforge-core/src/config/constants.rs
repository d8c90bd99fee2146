/// Model ID constants
pub mod models {
    pub mod google {
        pub const DEFAULT_MODEL: &str = GEMINI_2_5_FLASH;
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gemini-2.5-flash",
            "gemini-2.5-pro",
            "gemini-2.5-flash-lite",
        ];

        // Convenience constants for commonly used models
        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";
        pub const GEMINI_2_5_FLASH_LITE: &str = "gemini-2.5-flash-lite";
    }
}

/// API endpoints
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
}

/// Environment variables consulted for the Gemini credential, in priority order
/// after the configured one.
pub mod env_vars {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const API_KEY: &str = "API_KEY";
}

/// Configuration file locations
pub mod config_files {
    pub const FILE_NAME: &str = "pageforge.toml";
    pub const DIR_NAME: &str = ".pageforge";
}

pub mod defaults {
    /// Placeholder lead-capture form; replace it in `pageforge.toml`.
    pub const GUIDE_LINK: &str = "https://docs.google.com/forms/d/e/1FAIpQLS.../viewform?usp=sf_link";
    pub const USER_AGENT: &str = concat!("pageforge/", env!("CARGO_PKG_VERSION"));
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const FIRST_CHUNK_TIMEOUT_SECS: u64 = 90;
    pub const CHUNK_TIMEOUT_SECS: u64 = 30;
}
