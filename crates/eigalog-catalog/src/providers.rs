use eigalog_models::WatchProvider;
use tracing::debug;

/// Hand-maintained mapping from the provider display name returned by the
/// catalog API to the external storefront URL.
///
/// Providers absent from this table never render as links.
pub const PROVIDER_LINKS: [(&str, &str); 9] = [
    ("Netflix", "https://www.netflix.com/"),
    ("Disney Plus", "https://www.disneyplus.com/"),
    ("Amazon Prime Video", "https://www.amazon.co.jp/gp/video/storefront"),
    ("U-NEXT", "https://video.unext.jp/"),
    ("Hulu", "https://www.hulu.jp/"),
    ("Apple TV+", "https://tv.apple.com/"),
    ("dTV", "https://lemino.docomo.ne.jp/"),
    ("Rakuten TV", "https://tv.rakuten.co.jp/"),
    ("WOWOW", "https://www.wowow.co.jp/"),
];

/// A provider paired with the storefront it links out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedProvider {
    pub provider: WatchProvider,
    pub link: &'static str,
}

/// Storefront URL for a provider display name, if supported.
pub fn storefront_link(name: &str) -> Option<&'static str> {
    PROVIDER_LINKS
        .iter()
        .find(|(provider, _)| *provider == name)
        .map(|(_, url)| *url)
}

/// Keep only providers with a storefront entry, attaching the deep link.
///
/// Unsupported providers are dropped so the page never links to a
/// storefront we cannot vouch for.
pub fn link_providers(raw: Vec<WatchProvider>) -> Vec<LinkedProvider> {
    raw.into_iter()
        .filter_map(|provider| match storefront_link(&provider.provider_name) {
            Some(link) => Some(LinkedProvider { provider, link }),
            None => {
                debug!(
                    "Dropping provider without a storefront link: {}",
                    provider.provider_name
                );
                None
            }
        })
        .collect()
}
