use rand::Rng;

pub const DEFAULT_PROMO_IMAGES: [&str; 4] = ["ad1.jpg", "ad2.jpg", "ad3.jpg", "ad4.jpg"];
pub const DEFAULT_SPONSOR_LINK: &str = "https://elog.tokyo/";

/// Sponsor overlay shown once after a successful review submission, until
/// explicitly dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoPrompt {
    pub image: String,
    pub link: String,
}

/// Uniform pick over a fixed promotional image pool.
#[derive(Debug, Clone)]
pub struct PromoPicker {
    images: Vec<String>,
    link: String,
}

impl PromoPicker {
    pub fn new(images: Vec<String>, link: String) -> Self {
        let images = if images.is_empty() {
            DEFAULT_PROMO_IMAGES.iter().map(|s| s.to_string()).collect()
        } else {
            images
        };
        Self { images, link }
    }

    pub fn pick(&self) -> PromoPrompt {
        let index = rand::thread_rng().gen_range(0..self.images.len());
        PromoPrompt {
            image: self.images[index].clone(),
            link: self.link.clone(),
        }
    }
}

impl Default for PromoPicker {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_SPONSOR_LINK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_is_always_from_the_pool() {
        let picker = PromoPicker::default();
        for _ in 0..50 {
            let prompt = picker.pick();
            assert!(DEFAULT_PROMO_IMAGES.contains(&prompt.image.as_str()));
            assert_eq!(prompt.link, DEFAULT_SPONSOR_LINK);
        }
    }

    #[test]
    fn test_single_image_pool_is_deterministic() {
        let picker = PromoPicker::new(
            vec!["only.jpg".to_string()],
            "https://example.com/".to_string(),
        );
        assert_eq!(picker.pick().image, "only.jpg");
    }
}
