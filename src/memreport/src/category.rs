//! Category keys and parser classification.
//!
//! Every command block is identified by the string quoted in its begin
//! marker. The raw identifier may carry generation flags (`-alphasort`) or
//! a `class=<Name>` selector; [`normalize_key`] reduces it to the canonical
//! key the rest of the decoder dispatches on.

use serde::Serialize;

/// Prefix of per-class object listing categories.
pub const CLASS_PREFIX: &str = "class=";

/// Canonicalize the raw identifier quoted in a begin-command marker.
///
/// A `class=` selector wins over everything else: the key becomes
/// `class=<Token>` with any trailing flags discarded. Otherwise the
/// `-alphasort` flag is stripped. The result is trimmed.
pub fn normalize_key(raw: &str) -> String {
    let key = if let Some((_, rest)) = raw.split_once(CLASS_PREFIX) {
        let token = rest.split(' ').next().unwrap_or("");
        format!("{}{}", CLASS_PREFIX, token)
    } else if raw.contains("-alphasort") {
        raw.replace("-alphasort", "")
    } else {
        raw.to_string()
    };

    key.trim().to_string()
}

/// Which grammar a canonical category key maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryKind {
    /// Per-class object usage table (`class=<Name>`).
    ClassUsage,
    /// `ListTextures` per-asset texture table.
    TextureList,
    /// `ConfigMem` loaded-config-file table.
    ConfigMem,
    /// `r.DumpRenderTargetPoolMemory` pooled render target dump.
    RenderTargetPool,
    /// Recognized category with no grammar yet; raw lines are preserved.
    NotYetSupported,
    /// Unknown category; raw lines are preserved.
    Unrecognized,
}

impl CategoryKind {
    /// Map a canonical category key to its parser variant.
    pub fn classify(key: &str) -> Self {
        if key.starts_with(CLASS_PREFIX) {
            return CategoryKind::ClassUsage;
        }
        match key {
            "ListTextures" => CategoryKind::TextureList,
            "ConfigMem" => CategoryKind::ConfigMem,
            "r.DumpRenderTargetPoolMemory" => CategoryKind::RenderTargetPool,
            "DumpParticleMem" | "ListParticleSystems" => CategoryKind::NotYetSupported,
            _ => CategoryKind::Unrecognized,
        }
    }

    /// Human-readable kind name for digests and listings.
    pub fn name(&self) -> &'static str {
        match self {
            CategoryKind::ClassUsage => "class usage",
            CategoryKind::TextureList => "texture list",
            CategoryKind::ConfigMem => "config memory",
            CategoryKind::RenderTargetPool => "render target pool",
            CategoryKind::NotYetSupported => "not yet supported",
            CategoryKind::Unrecognized => "unrecognized",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_class_key_drops_trailing_flags() {
        assert_eq!(normalize_key("class=StaticMesh -alphasort"), "class=StaticMesh");
        assert_eq!(normalize_key("obj list class=Texture2D"), "class=Texture2D");
    }

    #[test]
    fn test_normalize_strips_alphasort() {
        assert_eq!(normalize_key("ListTextures -alphasort"), "ListTextures");
        assert_eq!(normalize_key("ListParticleSystems -alphasort"), "ListParticleSystems");
    }

    #[test]
    fn test_normalize_plain_key_is_trimmed() {
        assert_eq!(normalize_key(" ConfigMem "), "ConfigMem");
    }

    #[test]
    fn test_classify() {
        assert_eq!(CategoryKind::classify("class=StaticMesh"), CategoryKind::ClassUsage);
        assert_eq!(CategoryKind::classify("ListTextures"), CategoryKind::TextureList);
        assert_eq!(CategoryKind::classify("ConfigMem"), CategoryKind::ConfigMem);
        assert_eq!(
            CategoryKind::classify("r.DumpRenderTargetPoolMemory"),
            CategoryKind::RenderTargetPool
        );
        assert_eq!(CategoryKind::classify("DumpParticleMem"), CategoryKind::NotYetSupported);
        assert_eq!(CategoryKind::classify("rhi.DumpMemory"), CategoryKind::Unrecognized);
    }
}
