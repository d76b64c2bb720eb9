/// Optional storefront/platform integration (persona name, platform user id,
/// install location, store country). Hosts without a platform SDK linked in
/// use [`NoPlatform`]; a host with one supplies its own impl.
pub trait PlatformCapability {
    fn persona_name(&self) -> Option<String> {
        None
    }

    fn platform_id(&self) -> Option<String> {
        None
    }

    fn install_dir(&self) -> Option<String> {
        None
    }

    fn country_code(&self) -> Option<String> {
        None
    }
}

/// No-op provider: every capability is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlatform;

impl PlatformCapability for NoPlatform {}
