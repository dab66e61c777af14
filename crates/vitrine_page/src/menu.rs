//! # Navigation Links And Mobile Menu
//!
//! Section anchors are derived from the visible labels: lower-cased, with
//! diacritics removed, so `"Atuação"` links to `#atuacao`.

/// A label and the anchor it scrolls to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Visible text.
    pub label: String,
    /// Fragment identifier, without the `#`.
    pub anchor: String,
}

impl NavLink {
    /// Builds a link from its label.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            anchor: slugify(label),
        }
    }

    /// `href` value for the link.
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.anchor)
    }
}

/// Links for every label, in order.
#[must_use]
pub fn nav_links(labels: &[String]) -> Vec<NavLink> {
    labels.iter().map(|label| NavLink::new(label)).collect()
}

/// Lower-cases `label` and strips diacritics.
///
/// Characters without a base letter (`ß`, `æ`, punctuation, spaces) are kept
/// as they are.
#[must_use]
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .map(strip_accent)
        .collect()
}

/// Combining Diacritical Marks block, left over in decomposed input.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// Mobile navigation overlay.
#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
    links: Vec<NavLink>,
}

impl MobileMenu {
    /// A closed menu with `links`.
    #[must_use]
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { open: false, links }
    }

    /// True while the overlay is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Menu entries.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Opens a closed menu, closes an open one; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu; returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Follows the link at `index`, closing the menu.
    ///
    /// An out-of-range index leaves the menu untouched.
    pub fn follow(&mut self, index: usize) -> Option<&NavLink> {
        if index >= self.links.len() {
            return None;
        }
        self.open = false;
        self.links.get(index)
    }
}
