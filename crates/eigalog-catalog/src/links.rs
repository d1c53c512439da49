/// Build the eiga.com now-showing search URL for a movie title.
///
/// Rendered on the detail page only while the movie is in the region's
/// now-playing listing.
pub fn theater_search_url(title: &str) -> String {
    format!(
        "https://eiga.com/now/q/?title={}&region=&pref=&area=&genre=on&sort=release",
        urlencoding::encode(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theater_search_url_encodes_title() {
        let url = theater_search_url("Fight Club");
        assert_eq!(
            url,
            "https://eiga.com/now/q/?title=Fight%20Club&region=&pref=&area=&genre=on&sort=release"
        );
    }
}
