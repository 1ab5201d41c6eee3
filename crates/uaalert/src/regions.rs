//! # Oblast-Level Regions Known to `uaalert`
//!
//! | UID | Region                      | Aliases       |
//! |-----|-----------------------------|---------------|
//! | 29  | Автономна Республіка Крим   |               |
//! | 8   | Волинська область           |               |
//! | 4   | Вінницька область           |               |
//! | 9   | Дніпропетровська область    |               |
//! | 28  | Донецька область            |               |
//! | 10  | Житомирська область         |               |
//! | 11  | Закарпатська область        |               |
//! | 12  | Запорізька область          |               |
//! | 13  | Івано-Франківська область   |               |
//! | 31  | м. Київ                     | `Київ`        |
//! | 14  | Київська область            |               |
//! | 15  | Кіровоградська область      |               |
//! | 16  | Луганська область           |               |
//! | 27  | Львівська область           |               |
//! | 17  | Миколаївська область        |               |
//! | 18  | Одеська область             |               |
//! | 19  | Полтавська область          |               |
//! | 5   | Рівненська область          |               |
//! | 30  | м. Севастополь              | `Севастополь` |
//! | 20  | Сумська область             |               |
//! | 21  | Тернопільська область       |               |
//! | 22  | Харківська область          |               |
//! | 23  | Херсонська область          |               |
//! | 3   | Хмельницька область         |               |
//! | 24  | Черкаська область           |               |
//! | 26  | Чернівецька область         |               |
//! | 25  | Чернігівська область        |               |
//!
//! The table is listed in *canonical order*. The by-oblast status
//! endpoint reports one status character per region, in exactly this
//! order. See [`decode_statuses()`](crate::decode_statuses).
//!
//! ## See Also
//!
//! * [`Region`](crate::Region)
//! * [`AlertsClient::alert_status_by_name()`](crate::AlertsClient::alert_status_by_name)

use std::fmt;

use phf::phf_map;
use thiserror::Error;

/// Number of oblast-level regions in the canonical ordering
pub const REGION_COUNT: usize = 27;

/// An oblast-level region
///
/// Regions have a numeric UID, which the service uses in its
/// per-region endpoints, and a canonical display name. The two
/// city-level regions are also known by a short form of their name.
///
/// ```
/// use uaalert::Region;
///
/// let kyiv = Region::from_uid(31).expect("known region");
/// assert_eq!("м. Київ", kyiv.name());
/// assert_eq!(&["Київ"], kyiv.aliases());
/// assert!(kyiv.is_known_as("Київ"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    uid: u32,
    name: &'static str,
    aliases: &'static [&'static str],
}

impl Region {
    const fn new(uid: u32, name: &'static str) -> Self {
        Self {
            uid,
            name,
            aliases: &[],
        }
    }

    const fn with_aliases(uid: u32, name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { uid, name, aliases }
    }

    /// Lookup region by numeric UID
    pub fn from_uid(uid: u32) -> Option<&'static Region> {
        REGIONS.iter().find(|r| r.uid == uid)
    }

    /// Lookup region by canonical name or alias
    pub fn from_name<S>(name: S) -> Result<&'static Region, UnknownRegion>
    where
        S: AsRef<str>,
    {
        let uid = uid_for(name)?;
        Ok(Self::from_uid(uid).expect("region table and name index disagree"))
    }

    /// Numeric region UID
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// Canonical region name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Accepted alternative names
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// True if `name` is the canonical name or one of the aliases
    pub fn is_known_as(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// No region matches the given name
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("no region matches the name \"{0}\"")]
pub struct UnknownRegion(pub String);

/// All regions, in canonical order
pub static REGIONS: [Region; REGION_COUNT] = [
    Region::new(29, "Автономна Республіка Крим"),
    Region::new(8, "Волинська область"),
    Region::new(4, "Вінницька область"),
    Region::new(9, "Дніпропетровська область"),
    Region::new(28, "Донецька область"),
    Region::new(10, "Житомирська область"),
    Region::new(11, "Закарпатська область"),
    Region::new(12, "Запорізька область"),
    Region::new(13, "Івано-Франківська область"),
    Region::with_aliases(31, "м. Київ", &["Київ"]),
    Region::new(14, "Київська область"),
    Region::new(15, "Кіровоградська область"),
    Region::new(16, "Луганська область"),
    Region::new(27, "Львівська область"),
    Region::new(17, "Миколаївська область"),
    Region::new(18, "Одеська область"),
    Region::new(19, "Полтавська область"),
    Region::new(5, "Рівненська область"),
    Region::with_aliases(30, "м. Севастополь", &["Севастополь"]),
    Region::new(20, "Сумська область"),
    Region::new(21, "Тернопільська область"),
    Region::new(22, "Харківська область"),
    Region::new(23, "Херсонська область"),
    Region::new(3, "Хмельницька область"),
    Region::new(24, "Черкаська область"),
    Region::new(26, "Чернівецька область"),
    Region::new(25, "Чернігівська область"),
];

/// Name index: canonical names and aliases → UID
static UIDS: phf::Map<&'static str, u32> = phf_map! {
    "Хмельницька область" => 3,
    "Вінницька область" => 4,
    "Рівненська область" => 5,
    "Волинська область" => 8,
    "Дніпропетровська область" => 9,
    "Житомирська область" => 10,
    "Закарпатська область" => 11,
    "Запорізька область" => 12,
    "Івано-Франківська область" => 13,
    "Київська область" => 14,
    "Кіровоградська область" => 15,
    "Луганська область" => 16,
    "Миколаївська область" => 17,
    "Одеська область" => 18,
    "Полтавська область" => 19,
    "Сумська область" => 20,
    "Тернопільська область" => 21,
    "Харківська область" => 22,
    "Херсонська область" => 23,
    "Черкаська область" => 24,
    "Чернігівська область" => 25,
    "Чернівецька область" => 26,
    "Львівська область" => 27,
    "Донецька область" => 28,
    "Автономна Республіка Крим" => 29,
    "м. Севастополь" => 30,
    "Севастополь" => 30,
    "м. Київ" => 31,
    "Київ" => 31,
};

/// Lookup the numeric UID for a region `name`
///
/// Both canonical names and aliases are accepted. Matching is exact.
///
/// ```
/// assert_eq!(Ok(31), uaalert::uid_for("м. Київ"));
/// assert_eq!(Ok(31), uaalert::uid_for("Київ"));
/// assert!(uaalert::uid_for("Atlantis").is_err());
/// ```
pub fn uid_for<S>(name: S) -> Result<u32, UnknownRegion>
where
    S: AsRef<str>,
{
    let name = name.as_ref();
    UIDS.get(name)
        .copied()
        .ok_or_else(|| UnknownRegion(name.to_owned()))
}

/// Lookup the canonical name for a region `uid`
///
/// Aliases are never returned. If no region has this UID,
/// returns `None`; callers should supply their own display
/// string.
pub fn name_for(uid: u32) -> Option<&'static str> {
    Region::from_uid(uid).map(Region::name)
}

/// True if `name` is a known region name or alias
pub fn region_exists<S>(name: S) -> bool
where
    S: AsRef<str>,
{
    UIDS.contains_key(name.as_ref())
}

/// Iterator over canonical region names, in canonical order
pub fn canonical_order() -> impl ExactSizeIterator<Item = &'static str> {
    REGIONS.iter().map(Region::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    /// ensure the region table and the name index agree
    #[test]
    fn check_region_table() {
        let mut uids = HashSet::new();
        let mut names = 0;

        for region in REGIONS.iter() {
            assert!(uids.insert(region.uid()), "duplicate uid {}", region.uid());
            assert_eq!(Some(&region.uid()), UIDS.get(region.name()));
            names += 1;
            for alias in region.aliases() {
                assert_eq!(Some(&region.uid()), UIDS.get(alias));
                names += 1;
            }
        }

        for (name, uid) in UIDS.entries() {
            let region = Region::from_uid(*uid).expect("index names unknown uid");
            assert!(region.is_known_as(name), "{} not listed for {}", name, uid);
        }

        assert_eq!(names, UIDS.len());
        assert_eq!(REGION_COUNT + 2, UIDS.len());
    }

    #[test]
    fn test_uid_for() {
        assert_eq!(Ok(31), uid_for("м. Київ"));
        assert_eq!(Ok(31), uid_for("Київ"));
        assert_eq!(Ok(30), uid_for("Севастополь"));
        assert_eq!(Ok(14), uid_for("Київська область"));
        assert_eq!(Err(UnknownRegion("київ".to_owned())), uid_for("київ"));
        assert!(uid_for("").is_err());
    }

    #[test]
    fn test_name_for() {
        assert_eq!(Some("м. Київ"), name_for(31));
        assert_eq!(Some("м. Севастополь"), name_for(30));
        assert_eq!(Some("Хмельницька область"), name_for(3));
        assert_eq!(None, name_for(1));
        assert_eq!(None, name_for(32));

        // round trip through the alias lands on the canonical name
        assert_eq!(name_for(uid_for("Київ").unwrap()), Some("м. Київ"));
    }

    #[test]
    fn test_region_exists() {
        assert!(region_exists("Одеська область"));
        assert!(region_exists("Київ"));
        assert!(!region_exists("Одеса"));
    }

    #[test]
    fn test_canonical_order() {
        let order: Vec<&str> = canonical_order().collect();
        assert_eq!(REGION_COUNT, order.len());
        assert_eq!("Автономна Республіка Крим", order[0]);
        assert_eq!("м. Київ", order[9]);
        assert_eq!("м. Севастополь", order[18]);
        assert_eq!("Чернігівська область", order[26]);
    }

    #[test]
    fn test_region_from_name() {
        let sev = Region::from_name("Севастополь").unwrap();
        assert_eq!(30, sev.uid());
        assert_eq!("м. Севастополь", format!("{}", sev));
        assert_eq!(Err(UnknownRegion("Крим".to_owned())), Region::from_name("Крим"));
    }
}
