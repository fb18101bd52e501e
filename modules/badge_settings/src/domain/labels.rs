//! "Featured Image" relabeling on achievement edit screens

use std::borrow::Cow;
use std::collections::HashMap;

/// Kind of post being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    /// A post of one of the registered achievement types
    Achievement,
    /// The achievement type definition itself
    AchievementType,
    Other,
}

/// Translate the host's "Featured Image" label for achievement screens
pub fn featured_image_label(text: &str, kind: PostKind) -> Cow<'_, str> {
    if text != "Featured Image" {
        return Cow::Borrowed(text);
    }
    match kind {
        PostKind::Achievement => Cow::Borrowed("Achievement Image"),
        PostKind::AchievementType => Cow::Borrowed("Default Achievement Image"),
        PostKind::Other => Cow::Borrowed(text),
    }
}

/// Reword the featured image metabox markup
pub fn featured_image_metabox_text(html: &str, kind: PostKind) -> Cow<'_, str> {
    let replacement = match kind {
        PostKind::Achievement => "achievement image",
        PostKind::AchievementType => "default achievement image",
        PostKind::Other => return Cow::Borrowed(html),
    };
    if html.contains("featured image") {
        Cow::Owned(html.replace("featured image", replacement))
    } else {
        Cow::Borrowed(html)
    }
}

/// Override the media modal's featured image strings
pub fn media_modal_strings(strings: &mut HashMap<String, String>, kind: PostKind) {
    let (title, action) = match kind {
        PostKind::Achievement => ("Set Achievement Image", "Set achievement image"),
        PostKind::AchievementType => (
            "Set Default Achievement Image",
            "Set default achievement image",
        ),
        PostKind::Other => return,
    };
    strings.insert("setFeaturedImageTitle".to_string(), title.to_string());
    strings.insert("setFeaturedImage".to_string(), action.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_only_exact_match() {
        assert_eq!(
            featured_image_label("Featured Image", PostKind::Achievement),
            "Achievement Image"
        );
        assert_eq!(
            featured_image_label("Featured Image", PostKind::AchievementType),
            "Default Achievement Image"
        );
        assert_eq!(
            featured_image_label("Featured Image", PostKind::Other),
            "Featured Image"
        );
        assert_eq!(
            featured_image_label("Featured image", PostKind::Achievement),
            "Featured image"
        );
    }

    #[test]
    fn test_metabox_text() {
        let html = "<a>Set featured image</a>";
        assert_eq!(
            featured_image_metabox_text(html, PostKind::Achievement),
            "<a>Set achievement image</a>"
        );
        assert_eq!(
            featured_image_metabox_text(html, PostKind::AchievementType),
            "<a>Set default achievement image</a>"
        );
        assert!(matches!(
            featured_image_metabox_text(html, PostKind::Other),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_media_modal_strings() {
        let mut strings = HashMap::new();
        strings.insert("setFeaturedImage".to_string(), "Set featured image".to_string());

        media_modal_strings(&mut strings, PostKind::Other);
        assert_eq!(strings["setFeaturedImage"], "Set featured image");

        media_modal_strings(&mut strings, PostKind::Achievement);
        assert_eq!(strings["setFeaturedImageTitle"], "Set Achievement Image");
        assert_eq!(strings["setFeaturedImage"], "Set achievement image");
    }
}
