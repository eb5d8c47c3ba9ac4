//! Tier consistency rules for soup-family cafeteria menus
//!
//! When the cafeteria serves a stew or soup, an "upgrade" must stay in the
//! soup family. Dry or fried dishes and spicy Chinese hot-pot are demoted to
//! the alternative tier, and if that empties the upgrade tier the first
//! soup-family record among the remaining ones is promoted.

use shared::{ProcessId, RecommendationRecord, RecommendationTier, process_debug};

use super::classifier::{MenuCategory, classify, is_disallowed_soup_upgrade, is_soup_family};

/// Maximum number of recommendations handed back to callers
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Enforce the upgrade-tier rule for `cafeteria_menu` and cap the batch.
///
/// Non-soup cafeteria menus only get the cap applied.
pub fn correct_hierarchy(
    cafeteria_menu: &str,
    mut recs: Vec<RecommendationRecord>,
) -> Vec<RecommendationRecord> {
    if classify(cafeteria_menu) != MenuCategory::SoupFamily {
        recs.truncate(MAX_RECOMMENDATIONS);
        return recs;
    }

    let mut upgrade = Vec::new();
    let mut alternative = Vec::new();
    let mut other = Vec::new();

    for record in recs {
        match record.tier {
            RecommendationTier::Upgrade => upgrade.push(record),
            RecommendationTier::Alternative => alternative.push(record),
            RecommendationTier::Exception => other.push(record),
        }
    }

    let (kept, demoted): (Vec<_>, Vec<_>) = upgrade
        .into_iter()
        .partition(|record| !is_disallowed_soup_upgrade(&record.menu_name));
    let mut upgrade = kept;

    for record in demoted {
        process_debug!(
            ProcessId::current(),
            menu = %record.menu_name,
            "Demoted upgrade recommendation for soup-family cafeteria menu"
        );
        alternative.push(record.with_tier(RecommendationTier::Alternative));
    }

    if upgrade.is_empty() {
        if let Some(promoted) = take_first_promotable(&mut alternative)
            .or_else(|| take_first_promotable(&mut other))
        {
            process_debug!(
                ProcessId::current(),
                menu = %promoted.menu_name,
                "Promoted soup-family recommendation to upgrade"
            );
            upgrade.push(promoted.with_tier(RecommendationTier::Upgrade));
        }
    }

    upgrade
        .into_iter()
        .chain(alternative)
        .chain(other)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

/// Remove and return the first soup-family record that could legally be an
/// upgrade. Spicy hot-pot names contain soup keywords too, so they are skipped.
fn take_first_promotable(bucket: &mut Vec<RecommendationRecord>) -> Option<RecommendationRecord> {
    let index = bucket
        .iter()
        .position(|r| is_soup_family(&r.menu_name) && !is_disallowed_soup_upgrade(&r.menu_name))?;
    Some(bucket.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(tier: RecommendationTier, menu: &str) -> RecommendationRecord {
        RecommendationRecord::new(tier, format!("{menu} 식당"), menu)
    }

    fn summary(records: &[RecommendationRecord]) -> Vec<(RecommendationTier, &str)> {
        records.iter().map(|r| (r.tier, r.menu_name.as_str())).collect()
    }

    use RecommendationTier::{Alternative, Exception, Upgrade};

    #[test]
    fn test_dry_upgrade_demoted_without_soup_replacement() {
        let recs = vec![rec(Upgrade, "제육볶음"), rec(Alternative, "돈까스"), rec(Exception, "냉면")];
        let result = correct_hierarchy("김치찌개", recs);

        assert_eq!(
            summary(&result),
            vec![(Alternative, "돈까스"), (Alternative, "제육볶음"), (Exception, "냉면")]
        );
        assert!(result.iter().all(|r| r.tier != Upgrade));
    }

    #[test]
    fn test_soup_upgrade_passes() {
        let recs = vec![rec(Upgrade, "김치전골"), rec(Alternative, "제육볶음")];
        let result = correct_hierarchy("김치찌개", recs.clone());
        assert_eq!(result, recs);
    }

    #[test]
    fn test_non_soup_cafeteria_menu_passthrough() {
        let recs = vec![rec(Upgrade, "제육볶음"), rec(Exception, "마라탕"), rec(Alternative, "돈까스")];
        assert_eq!(correct_hierarchy("파스타", recs.clone()), recs);
    }

    #[test]
    fn test_spicy_hot_pot_upgrade_demoted_and_not_repromoted() {
        let recs = vec![rec(Upgrade, "마라탕"), rec(Exception, "냉면")];
        let result = correct_hierarchy("된장찌개", recs);
        assert_eq!(summary(&result), vec![(Alternative, "마라탕"), (Exception, "냉면")]);
    }

    #[test]
    fn test_promotion_prefers_alternative_bucket() {
        let recs = vec![
            rec(Upgrade, "돈까스"),
            rec(Exception, "갈비탕"),
            rec(Alternative, "순두부찌개"),
        ];
        let result = correct_hierarchy("김치찌개", recs);
        assert_eq!(
            summary(&result),
            vec![(Upgrade, "순두부찌개"), (Alternative, "돈까스"), (Exception, "갈비탕")]
        );
    }

    #[test]
    fn test_promotion_falls_back_to_other_bucket() {
        let recs = vec![rec(Upgrade, "제육볶음"), rec(Alternative, "냉면"), rec(Exception, "곰탕")];
        let result = correct_hierarchy("설렁탕", recs);
        assert_eq!(
            summary(&result),
            vec![(Upgrade, "곰탕"), (Alternative, "냉면"), (Alternative, "제육볶음")]
        );
    }

    #[test]
    fn test_promotion_first_match_wins() {
        let recs = vec![rec(Alternative, "육개장"), rec(Alternative, "김치찌개"), rec(Alternative, "된장찌개")];
        let result = correct_hierarchy("부대찌개", recs);
        // 육개장 has no soup keyword; 김치찌개 is the first soup-family alternative
        assert_eq!(result[0].menu_name, "김치찌개");
        assert_eq!(result[0].tier, Upgrade);
    }

    #[test]
    fn test_output_capped_at_three() {
        let recs = vec![
            rec(Upgrade, "갈비탕"),
            rec(Alternative, "A"),
            rec(Alternative, "B"),
            rec(Exception, "C"),
            rec(Exception, "D"),
        ];
        assert_eq!(correct_hierarchy("김치찌개", recs.clone()).len(), MAX_RECOMMENDATIONS);
        assert_eq!(correct_hierarchy("파스타", recs).len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_correction_is_idempotent() {
        let batches = vec![
            vec![rec(Upgrade, "제육볶음"), rec(Alternative, "돈까스"), rec(Exception, "냉면")],
            vec![rec(Upgrade, "돈까스"), rec(Exception, "갈비탕"), rec(Alternative, "순두부찌개")],
            vec![rec(Upgrade, "마라탕"), rec(Upgrade, "훠궈"), rec(Exception, "곰탕"), rec(Alternative, "덮밥")],
            vec![rec(Exception, "냉면"), rec(Upgrade, "김치전골")],
        ];

        for batch in batches {
            let once = correct_hierarchy("김치찌개", batch);
            let twice = correct_hierarchy("김치찌개", once.clone());
            assert_eq!(once, twice);
            assert!(
                once.iter()
                    .filter(|r| r.tier == Upgrade)
                    .all(|r| !is_disallowed_soup_upgrade(&r.menu_name))
            );
        }
    }

    #[test]
    fn test_matching_uses_raw_cafeteria_text() {
        // The whole free-text line is scanned, not a parsed main dish
        let recs = vec![rec(Upgrade, "제육볶음")];
        let result = correct_hierarchy("쌀밥, 제육볶음, 된장국", recs);
        assert_eq!(result[0].tier, Alternative);
    }

    #[test]
    fn test_empty_input() {
        assert!(correct_hierarchy("김치찌개", Vec::new()).is_empty());
    }
}
