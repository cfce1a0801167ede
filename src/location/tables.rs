//! Curated place-name tables
//!
//! These are hand-maintained and intentionally small. Anything not listed
//! falls through to the generic suffix rules in [`super::names`].

/// Korean city names searched with their established English spelling
/// instead of the romanizer output.
pub const SEARCH_TERMS: &[(&str, &str)] = &[
    ("서울", "Seoul"),
    ("부산", "Busan"),
    ("대구", "Daegu"),
    ("인천", "Incheon"),
    ("광주", "Gwangju"),
    ("대전", "Daejeon"),
    ("울산", "Ulsan"),
    ("수원", "Suwon"),
    ("고양", "Goyang"),
    ("창원", "Changwon"),
    ("성남", "Seongnam"),
    ("청주", "Cheongju"),
    ("부천", "Bucheon"),
    ("화성", "Hwaseong"),
    ("안산", "Ansan"),
    ("안양", "Anyang"),
    ("김포", "Gimpo"),
    ("제주", "Jeju"),
    ("전주", "Jeonju"),
    ("천안", "Cheonan"),
    ("포항", "Pohang"),
    ("진주", "Jinju"),
];

/// admin1 (province level) to Korean province name
pub const PROVINCES: &[(&str, &str)] = &[
    ("Gyeonggi", "경기도"),
    ("Gyeonggi-do", "경기도"),
    ("Seoul", "서울특별시"),
    ("Busan", "부산광역시"),
    ("Daegu", "대구광역시"),
    ("Incheon", "인천광역시"),
    ("Gwangju", "광주광역시"),
    ("Daejeon", "대전광역시"),
    ("Ulsan", "울산광역시"),
    ("Jeju", "제주도"),
    ("Gangwon", "강원도"),
    ("Gangwon-do", "강원도"),
    ("Chungcheongbuk-do", "충청북도"),
    ("North Chungcheong", "충청북도"),
    ("Chungcheongnam-do", "충청남도"),
    ("South Chungcheong", "충청남도"),
    ("Jeollabuk-do", "전라북도"),
    ("North Jeolla", "전라북도"),
    ("Jeollanam-do", "전라남도"),
    ("South Jeolla", "전라남도"),
    ("Gyeongsangbuk-do", "경상북도"),
    ("North Gyeongsang", "경상북도"),
    ("Gyeongsangnam-do", "경상남도"),
    ("South Gyeongsang", "경상남도"),
];

/// Full administrative names with a known Korean form
pub const PLACE_NAMES: &[(&str, &str)] = &[
    ("Suwon-si", "수원시"),
    ("Pocheon-si", "포천시"),
    ("Gochang-gun", "고창군"),
    ("Buyeo-gun", "부여군"),
    ("Yeonggwang-gun", "영광군"),
    ("Gimpo-si", "김포시"),
    ("Gwangmyeong-si", "광명시"),
    ("Uijeongbu-si", "의정부시"),
    ("Gongju-si", "공주시"),
    ("Gongeum-myeon", "공음면"),
    ("Yanghwa-myeon", "양화면"),
    ("Gunnam-myeon", "군남면"),
    ("Myoryang-myeon", "묘량면"),
    ("Gyuam-myeon", "규암면"),
    ("Ongnyong-dong", "옹룡동"),
    ("Useong-myeon", "우성면"),
    ("Yeonsan-myeon", "연산면"),
    ("U-dong", "우동"),
];

/// Name stems replaced as whole words before suffix conversion
pub const NAME_STEMS: &[(&str, &str)] = &[
    ("Suwon", "수원"),
    ("Pocheon", "포천"),
    ("Gochang", "고창"),
    ("Buyeo", "부여"),
    ("Yeonggwang", "영광"),
    ("Gongeum", "공음"),
    ("Yanghwa", "양화"),
    ("Gunnam", "군남"),
    ("Myoryang", "묘량"),
    ("Gyuam", "규암"),
    ("Gimpo", "김포"),
    ("Gwangmyeong", "광명"),
    ("Uijeongbu", "의정부"),
    ("Gongju", "공주"),
    ("Ongnyong", "옹룡"),
    ("Goyang", "고양"),
    ("Koyang", "고양"),
    ("Nonsan", "논산"),
    ("Hanam", "하남"),
    ("Useong", "우성"),
    ("Yeonsan", "연산"),
    ("Haeundae", "해운대"),
    ("Gangnam", "강남"),
    ("Jongno", "종로"),
    ("Mapo", "마포"),
    ("Yeongdeungpo", "영등포"),
    ("Songpa", "송파"),
    ("Gangseo", "강서"),
    ("Dongdaemun", "동대문"),
    ("Seodaemun", "서대문"),
];

/// Romanized administrative suffixes, applied in order
pub const SUFFIXES: &[(&str, &str)] = &[
    ("-si", "시"),
    ("-gun", "군"),
    ("-gu", "구"),
    ("-do", "도"),
    ("-myeon", "면"),
    ("-eup", "읍"),
    ("-dong", "동"),
    ("-ri", "리"),
];

/// Upstream names that need a hand-picked display name
pub const SPECIAL_NAMES: &[(&str, &str)] = &[
    ("Suwongol", "수원골"),
    ("Suwonteo", "수원터"),
    ("Uijeongbu-si", "의정부시"),
    ("Uijeongbu sam dong", "의정부3동"),
    ("Uijeongbu i dong", "의정부2동"),
    ("Uijeongbu il dong", "의정부1동"),
    ("Goyang-si", "고양시"),
    ("Goyang", "고양"),
    ("Goyanggol", "고양골"),
    ("Goyanggyo", "고양교"),
    ("Koyang-ni", "고양리"),
    ("Koyang", "고양"),
    ("Gongju-si", "공주시"),
    ("Nonsan-si", "논산시"),
    ("Hanam-si", "하남시"),
    ("Haeundae", "해운대"),
    ("Haeundaegongwon", "해운대공원"),
    ("Haeundae-gu", "해운대구"),
    ("U-dong", "우동"),
];

/// Village names whose generic conversion reads wrong
pub const VILLAGE_OVERRIDES: &[(&str, &str)] = &[("Suwon", "수원"), ("Pocheon", "포천")];

/// Exact-match lookup in one of the tables above
#[must_use]
pub fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(from, to)| (*from == key).then_some(*to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_have_unique_keys() {
        for table in [
            SEARCH_TERMS,
            PROVINCES,
            PLACE_NAMES,
            NAME_STEMS,
            SPECIAL_NAMES,
            VILLAGE_OVERRIDES,
        ] {
            let keys: HashSet<_> = table.iter().map(|(k, _)| *k).collect();
            assert_eq!(keys.len(), table.len());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(PROVINCES, "Gyeonggi-do"), Some("경기도"));
        assert_eq!(lookup(PROVINCES, "gyeonggi-do"), None);
        assert_eq!(lookup(SEARCH_TERMS, "수원"), Some("Suwon"));
    }
}
