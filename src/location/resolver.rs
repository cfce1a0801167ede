//! Display name resolution for geocoding results
//!
//! Resolution walks a fixed, ordered list of rules and takes the first one
//! that produces a name. The order matters: a curated special name beats a
//! match on the user's query, which beats the generic city and village
//! heuristics.

use tracing::{debug, instrument};

use super::names::{province_name, to_korean};
use super::romanize::{contains_hangul, romanize};
use super::tables::{self, SEARCH_TERMS, SPECIAL_NAMES, VILLAGE_OVERRIDES};
use crate::models::{AdministrativeArea, Country, DisplayLocation, open_meteo::GeocodeResult};

const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
const COUNTRY_KOREAN: &str = "대한민국";
const COUNTRY_ENGLISH: &str = "South Korea";

/// Search term sent to the geocoder for a user query.
///
/// Known Korean city names use their established spelling, other Hangul is
/// romanized and anything else is used as typed.
#[must_use]
pub fn search_term(query: &str) -> String {
    if let Some(english) = tables::lookup(SEARCH_TERMS, query) {
        english.to_string()
    } else if contains_hangul(query) {
        romanize(query)
    } else {
        query.to_string()
    }
}

/// Inputs shared by every rule
struct Context<'a> {
    query: &'a str,
    search_term: String,
    result: &'a GeocodeResult,
    province: String,
}

impl Context<'_> {
    fn admin2(&self) -> Option<&str> {
        non_empty(self.result.admin2.as_deref())
    }

    fn admin3(&self) -> Option<&str> {
        non_empty(self.result.admin3.as_deref())
    }

    /// Province followed by the given parts, blanks dropped
    fn address<I: IntoIterator<Item = String>>(&self, parts: I) -> String {
        std::iter::once(self.province.clone())
            .chain(parts)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Display name plus detailed address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub display_name: String,
    pub detailed_address: String,
}

type Rule = fn(&Context<'_>) -> Option<ResolvedName>;

/// Named resolution rule, in priority order
pub struct NamedRule {
    pub name: &'static str,
    apply: Rule,
}

/// Rules that may decline, highest priority first. [`village`] answers
/// whatever none of them claim.
pub static RULES: &[NamedRule] = &[
    NamedRule {
        name: "special_name",
        apply: special_name,
    },
    NamedRule {
        name: "query_matches_admin",
        apply: query_matches_admin,
    },
    NamedRule {
        name: "city",
        apply: city,
    },
];

/// Name reported when no rule in [`RULES`] applies
pub const FALLBACK_RULE: &str = "village";

/// Resolves geocoding results to Korean display locations
#[derive(Debug, Default, Clone, Copy)]
pub struct NameResolver;

impl NameResolver {
    /// Build the display location for one geocoding result of `query`
    #[instrument(level = "debug", skip(self, result), fields(name = %result.name))]
    pub fn resolve(&self, query: &str, result: &GeocodeResult) -> DisplayLocation {
        let (rule, resolved) = self.resolve_name(query, result);
        debug!(rule, display_name = %resolved.display_name, "Resolved location name");

        DisplayLocation {
            key: format!("{}_{}", result.latitude, result.longitude),
            localized_name: resolved.display_name,
            detailed_address: resolved.detailed_address,
            english_name: result.name.clone(),
            country: Country {
                localized_name: COUNTRY_KOREAN.to_string(),
                english_name: COUNTRY_ENGLISH.to_string(),
            },
            administrative_area: AdministrativeArea {
                localized_name: province_name(result.admin1.as_deref()),
                english_name: result.admin1.clone().unwrap_or_default(),
            },
            is_alias: false,
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            population: result.population.unwrap_or(0),
        }
    }

    /// Run the rule list, returning the winning rule's name and its output
    #[must_use]
    pub fn resolve_name(&self, query: &str, result: &GeocodeResult) -> (&'static str, ResolvedName) {
        let context = Context {
            query,
            search_term: search_term(query),
            result,
            province: province_name(result.admin1.as_deref()),
        };

        RULES
            .iter()
            .find_map(|rule| (rule.apply)(&context).map(|resolved| (rule.name, resolved)))
            .unwrap_or_else(|| (FALLBACK_RULE, village(&context)))
    }
}

fn special_name(ctx: &Context<'_>) -> Option<ResolvedName> {
    let display_name = tables::lookup(SPECIAL_NAMES, &ctx.result.name)?.to_string();

    let admin2 = ctx.admin2().map(to_korean);
    let admin3 = ctx
        .admin3()
        .filter(|_| !display_name.contains('동'))
        .map(to_korean);

    Some(ResolvedName {
        detailed_address: ctx.address(admin2.into_iter().chain(admin3)),
        display_name,
    })
}

fn query_matches_admin(ctx: &Context<'_>) -> Option<ResolvedName> {
    let matched = matching_admin(ctx)?;

    let admin2 = ctx.admin2().map(to_korean).filter(|name| *name != matched);
    let admin3 = ctx.admin3().map(to_korean).filter(|name| *name != matched);

    Some(ResolvedName {
        detailed_address: ctx.address(admin2.into_iter().chain(admin3)),
        display_name: matched,
    })
}

/// First of admin2/admin3 containing the query or its search term, then
/// (for Hangul queries) the romanized query.
fn matching_admin(ctx: &Context<'_>) -> Option<String> {
    let units = [ctx.admin2(), ctx.admin3()];
    let query = ctx.query.to_lowercase();
    let search = ctx.search_term.to_lowercase();

    let contains = |needle: &str| {
        units
            .iter()
            .flatten()
            .find(|unit| unit.to_lowercase().contains(needle))
            .map(|unit| to_korean(unit))
    };

    units
        .iter()
        .flatten()
        .find(|unit| {
            let unit = unit.to_lowercase();
            unit.contains(&query) || unit.contains(&search)
        })
        .map(|unit| to_korean(unit))
        .or_else(|| {
            contains_hangul(ctx.query)
                .then(|| romanize(ctx.query).to_lowercase())
                .and_then(|romanized| contains(&romanized))
        })
}

fn city(ctx: &Context<'_>) -> Option<ResolvedName> {
    let admin2 = ctx.admin2().filter(|admin2| admin2.ends_with("-si"))?;
    let display_name = to_korean(admin2);

    Some(ResolvedName {
        detailed_address: ctx.address(Some(display_name.clone())),
        display_name,
    })
}

fn village(ctx: &Context<'_>) -> ResolvedName {
    let name = &ctx.result.name;
    let display_name = match (tables::lookup(VILLAGE_OVERRIDES, name), ctx.admin3()) {
        (Some(base), Some(_)) => format!("{base}리"),
        (Some(base), None) => base.to_string(),
        (None, Some(admin3)) => {
            let korean = to_korean(name);
            if admin3.ends_with("-myeon") && !korean.ends_with('리') {
                format!("{korean}리")
            } else {
                korean
            }
        }
        (None, None) => to_korean(name),
    };

    ResolvedName {
        detailed_address: ctx.address(
            ctx.admin2()
                .map(to_korean)
                .into_iter()
                .chain(ctx.admin3().map(to_korean)),
        ),
        display_name,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, admin1: &str, admin2: Option<&str>, admin3: Option<&str>) -> GeocodeResult {
        GeocodeResult {
            name: name.to_string(),
            latitude: 37.29111,
            longitude: 127.00889,
            country: Some("South Korea".to_string()),
            admin1: Some(admin1.to_string()),
            admin2: admin2.map(str::to_string),
            admin3: admin3.map(str::to_string),
            population: None,
            timezone: None,
        }
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("수원"), "Suwon");
        assert_eq!(search_term("양화"), "Yanghwa");
        assert_eq!(search_term("Daejeon"), "Daejeon");
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, ["special_name", "query_matches_admin", "city"]);
        assert_eq!(FALLBACK_RULE, "village");
    }

    #[test]
    fn test_suwon_si_resolves_to_city_name() {
        let location = NameResolver.resolve(
            "수원",
            &result("Suwon", "Gyeonggi-do", Some("Suwon-si"), Some("Paldal-gu")),
        );
        assert_eq!(location.localized_name, "수원시");
        assert!(location.detailed_address.starts_with("경기도"));
        assert_eq!(location.detailed_address, "경기도 Paldal구");
        assert_eq!(location.key, "37.29111_127.00889");
    }

    #[test]
    fn test_special_name_wins_over_query_match() {
        let (rule, resolved) = NameResolver.resolve_name(
            "goyang",
            &result("Goyang-si", "Gyeonggi-do", Some("Goyang-si"), Some("Ilsandong-gu")),
        );
        assert_eq!(rule, "special_name");
        assert_eq!(resolved.display_name, "고양시");
        assert_eq!(resolved.detailed_address, "경기도 고양시 Ilsandong구");
    }

    #[test]
    fn test_special_dong_name_skips_admin3() {
        let (_, resolved) = NameResolver.resolve_name(
            "의정부",
            &result("Uijeongbu sam dong", "Gyeonggi-do", Some("Uijeongbu-si"), Some("Somewhere-dong")),
        );
        assert_eq!(resolved.display_name, "의정부3동");
        assert_eq!(resolved.detailed_address, "경기도 의정부시");
    }

    #[test]
    fn test_query_match_on_admin3_excludes_it_from_address() {
        let (rule, resolved) = NameResolver.resolve_name(
            "공음",
            &result("Seokgyo", "Jeollabuk-do", Some("Gochang-gun"), Some("Gongeum-myeon")),
        );
        assert_eq!(rule, "query_matches_admin");
        assert_eq!(resolved.display_name, "공음면");
        assert_eq!(resolved.detailed_address, "전라북도 고창군");
    }

    #[test]
    fn test_city_rule_when_query_does_not_match() {
        let (rule, resolved) = NameResolver.resolve_name(
            "Maetan",
            &result("Maetan", "Gyeonggi-do", Some("Suwon-si"), None),
        );
        assert_eq!(rule, "city");
        assert_eq!(resolved.display_name, "수원시");
        assert_eq!(resolved.detailed_address, "경기도 수원시");
    }

    #[test]
    fn test_village_under_myeon_gets_ri_suffix() {
        let (rule, resolved) = NameResolver.resolve_name(
            "Daeri",
            &result("Sinpyeong", "South Chungcheong", Some("Buyeo-gun"), Some("Gyuam-myeon")),
        );
        assert_eq!(rule, "village");
        assert_eq!(resolved.display_name, "Sinpyeong리");
        assert_eq!(resolved.detailed_address, "충청남도 부여군 규암면");
    }

    #[test]
    fn test_village_already_ending_in_ri_is_not_doubled() {
        let (_, resolved) = NameResolver.resolve_name(
            "Xyz",
            &result("Hado-ri", "South Jeolla", Some("Yeonggwang-gun"), Some("Myoryang-myeon")),
        );
        assert_eq!(resolved.display_name, "Hado리");
    }

    #[test]
    fn test_village_override() {
        let with_admin3 = NameResolver.resolve_name(
            "Xyz",
            &result("Suwon", "North Jeolla", Some("Gochang-gun"), Some("Gongeum-myeon")),
        );
        assert_eq!(with_admin3.1.display_name, "수원리");

        let without_admin3 = NameResolver.resolve_name(
            "Xyz",
            &result("Pocheon", "North Jeolla", Some("Gochang-gun"), None),
        );
        assert_eq!(without_admin3.1.display_name, "포천");
    }

    #[test]
    fn test_no_admin_units_falls_back_to_village() {
        let (rule, resolved) =
            NameResolver.resolve_name("Xyz", &result("Mapo", "Seoul", None, None));
        assert_eq!(rule, "village");
        assert_eq!(resolved.display_name, "마포");

        let location = NameResolver.resolve("Xyz", &result("Mapo", "Seoul", None, None));
        assert_eq!(location.localized_name, "마포");
        assert_eq!(location.detailed_address, "서울특별시");
        assert_eq!(location.administrative_area.localized_name, "서울특별시");
        assert_eq!(location.administrative_area.english_name, "Seoul");
        assert_eq!(location.timezone, "Asia/Seoul");
        assert_eq!(location.population, 0);
    }

    #[test]
    fn test_resolution_is_pure() {
        let input = result("Suwon", "Gyeonggi-do", Some("Suwon-si"), Some("Paldal-gu"));
        assert_eq!(
            NameResolver.resolve("수원", &input),
            NameResolver.resolve("수원", &input)
        );
    }
}
