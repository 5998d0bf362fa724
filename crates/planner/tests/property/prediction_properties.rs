use mediamix_core::{AudienceTarget, CampaignGoal, CampaignSettings, CampaignType, ChannelKind};
use mediamix_planner::tables::{DEFAULT_CONVERSION, DEFAULT_CPM, DEFAULT_CTR};
use mediamix_planner::{build_media_mix, predict_channel_metrics};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn goal() -> impl Strategy<Value = CampaignGoal> {
    prop::sample::select(CampaignGoal::ALL.to_vec())
}

fn channel_id() -> impl Strategy<Value = String> {
    prop::sample::select(ChannelKind::ALL.to_vec()).prop_map(|k| k.id().to_string())
}

fn settings() -> impl Strategy<Value = CampaignSettings> {
    (
        prop::sample::select(CampaignType::ALL.to_vec()),
        prop::sample::select(AudienceTarget::ALL.to_vec()),
        prop::sample::select(vec![1u32, 3, 6, 12]),
        any::<bool>(),
    )
        .prop_map(
            |(campaign_type, audience_target, duration_months, is_automated)| CampaignSettings {
                campaign_type,
                audience_target,
                duration_months,
                is_automated,
            },
        )
}

proptest! {
    #[test]
    fn rates_stay_strictly_fractional(
        id in channel_id(),
        goal in goal(),
        budget in 100.0f64..1_000_000.0,
        settings in settings(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = predict_channel_metrics(&id, goal, budget, &settings, &mut rng).unwrap();
        prop_assert!(p.ctr > 0.0 && p.ctr < 1.0, "ctr {}", p.ctr);
        prop_assert!(p.conversion > 0.0 && p.conversion < 1.0, "conversion {}", p.conversion);
        prop_assert!(p.cpm >= 0.0);
        prop_assert!(p.cpc >= 0.0);
        prop_assert!(p.roi > 0.0);
        prop_assert_eq!(p.engagement, 0);
    }

    #[test]
    fn cac_guard_follows_conversions(
        id in channel_id(),
        goal in goal(),
        budget in 1.0f64..100_000.0,
        settings in settings(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = predict_channel_metrics(&id, goal, budget, &settings, &mut rng).unwrap();
        if p.conversions == 0 {
            prop_assert_eq!(p.cac, 0);
        } else {
            prop_assert_eq!(p.cac, (budget / p.conversions as f64).round() as u64);
        }
    }

    #[test]
    fn allocation_and_budget_sum_to_totals(
        ids in prop::collection::vec(channel_id(), 1..=12),
        budget in 1.0f64..10_000_000.0,
        goal in goal(),
        settings in settings(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mix = build_media_mix(&ids, budget, goal, &settings, &mut rng).unwrap();
        prop_assert_eq!(mix.len(), ids.len());
        let allocation: f64 = mix.iter().map(|e| e.allocation).sum();
        let spent: f64 = mix.iter().map(|e| e.budget).sum();
        prop_assert!((allocation - 100.0).abs() < 1e-6);
        prop_assert!((spent - budget).abs() < 1e-6 * budget.max(1.0));
    }

    #[test]
    fn unknown_channel_draws_from_default_ranges(
        suffix in "[a-z]{3,10}",
        budget in 10_000.0f64..1_000_000.0,
        seed in any::<u64>(),
    ) {
        let id = format!("x_{suffix}");
        prop_assume!(ChannelKind::from_id(&id).is_none());

        // consideration + broad + web landing + 1 month: impressions x0.8,
        // ctr x0.96, conversion x0.8
        let settings = CampaignSettings::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let p = predict_channel_metrics(&id, CampaignGoal::Consideration, budget, &settings, &mut rng)
            .unwrap();

        let implied_cpm = budget * 1000.0 * 0.8 / p.impressions as f64;
        prop_assert!(implied_cpm >= DEFAULT_CPM.min * 0.999 && implied_cpm <= DEFAULT_CPM.max * 1.001,
            "implied cpm {}", implied_cpm);
        prop_assert!(p.ctr >= DEFAULT_CTR.min * 0.96 - 5e-5 && p.ctr <= DEFAULT_CTR.max * 0.96 + 5e-5);
        prop_assert!(p.conversion >= DEFAULT_CONVERSION.min * 0.8 - 5e-5
            && p.conversion <= DEFAULT_CONVERSION.max * 0.8 + 5e-5);
    }
}
