#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use apt_insight::config::{AppConfig, DataSource};
    use apt_insight::contexts::auth::{AuthAction, AuthState};
    use apt_insight::contexts::subscription::{SubscriptionContext, SubscriptionSnapshot};
    use apt_insight::models::analysis::{ApartmentStats, GapOpportunities, MarketSummary};
    use apt_insight::models::filters::AnalysisFilters;
    use apt_insight::models::region::Region;
    use apt_insight::models::session::{Session, UserProfile};
    use apt_insight::models::subscription::{Feature, Subscription, SubscriptionTier};
    use apt_insight::services::api::TokenStore;
    use apt_insight::services::engine::{AnalysisKind, QueryEngine};
    use futures::executor::block_on;
    use yew::Callback;
    use yew::functional::Reducible;

    // Helper: an engine wired to fixtures, never the network.
    fn fixture_engine() -> QueryEngine {
        let config = AppConfig::builder().data_source(DataSource::Fixture).build();
        QueryEngine::new(config, TokenStore::new()).unwrap()
    }

    fn premium_subscription() -> Subscription {
        serde_json::from_str(
            r#"{
                "tier": "premium",
                "features": {"pdf_export": true, "gap_signals": true, "saved_searches": 20}
            }"#,
        )
        .unwrap()
    }

    // ===== Engine + Fixture Tests =====

    #[test]
    fn test_by_apartment_filters_apply_end_to_end() {
        let engine = fixture_engine();
        let filters = AnalysisFilters {
            region: Some(Region::Songpa),
            min_count: Some(50),
            ..AnalysisFilters::default()
        };

        let stats: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &filters)).unwrap();

        assert!(!stats.is_empty());
        for row in stats.iter() {
            assert_eq!(row.region, "송파구");
            assert!(row.count >= 50);
        }
    }

    #[test]
    fn test_search_filter_end_to_end() {
        let engine = fixture_engine();
        let filters = AnalysisFilters {
            search: Some("엘스".into()),
            ..AnalysisFilters::default()
        };

        let stats: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &filters)).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats.iter().next().unwrap().name, "잠실엘스");
    }

    #[test]
    fn test_all_sentinel_shares_cache_entry_with_no_filter() {
        let engine = fixture_engine();
        let with_sentinel = AnalysisFilters {
            region: Some(Region::All),
            ..AnalysisFilters::default()
        };
        let without = AnalysisFilters::default();

        let first: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &with_sentinel)).unwrap();
        let second: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &without)).unwrap();

        // Same cache entry, not merely equal data.
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_filters_are_independent() {
        let engine = fixture_engine();
        let gangnam = AnalysisFilters {
            region: Some(Region::Gangnam),
            ..AnalysisFilters::default()
        };
        let nowon = AnalysisFilters {
            region: Some(Region::Nowon),
            ..AnalysisFilters::default()
        };

        let a: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &gangnam)).unwrap();
        let b: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &nowon)).unwrap();

        assert!(!Rc::ptr_eq(&a, &b));
        assert!(a.iter().all(|r| r.region == "강남구"));
        assert!(b.iter().all(|r| r.region == "노원구"));

        // Reading one entry leaves the other untouched.
        let a_again: Rc<ApartmentStats> =
            block_on(engine.analysis(AnalysisKind::ByApartment, &gangnam)).unwrap();
        assert!(Rc::ptr_eq(&a, &a_again));
    }

    #[test]
    fn test_invalidation_forces_refetch() {
        let engine = fixture_engine();
        let filters = AnalysisFilters::default();

        let before: Rc<GapOpportunities> =
            block_on(engine.analysis(AnalysisKind::GapInvestment, &filters)).unwrap();
        engine.invalidate(AnalysisKind::GapInvestment);
        let after: Rc<GapOpportunities> =
            block_on(engine.analysis(AnalysisKind::GapInvestment, &filters)).unwrap();

        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn test_summary_fixture_parses_into_typed_record() {
        let engine = fixture_engine();
        let summary: Rc<MarketSummary> =
            block_on(engine.analysis(AnalysisKind::MarketSummary, &AnalysisFilters::default()))
                .unwrap();

        assert!(summary.total_transactions > 0);
        assert!(!summary.hottest_region.is_empty());
    }

    // ===== Auth State Machine Tests =====

    fn reduce(state: AuthState, action: AuthAction) -> AuthState {
        (*Reducible::reduce(Rc::new(state), action)).clone()
    }

    fn session() -> Rc<Session> {
        Rc::new(Session {
            user: UserProfile {
                id: 7,
                email: "minsu@example.com".into(),
                name: "박민수".into(),
            },
            token: "tok_xyz".into(),
            tier: SubscriptionTier::Free,
        })
    }

    #[test]
    fn test_login_transitions() {
        let state = AuthState::Anonymous;
        let state = reduce(state, AuthAction::Started);
        assert_eq!(state, AuthState::Authenticating);

        let state = reduce(state, AuthAction::LoggedIn(session()));
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().user.name, "박민수");

        let state = reduce(state, AuthAction::LoggedOut);
        assert_eq!(state, AuthState::Anonymous);
    }

    #[test]
    fn test_failed_login_and_expiry() {
        let state = reduce(
            AuthState::Authenticating,
            AuthAction::Failed("잘못된 비밀번호".into()),
        );
        assert_eq!(state, AuthState::Error("잘못된 비밀번호".into()));
        assert!(!state.is_authenticated());

        let state = reduce(
            AuthState::Authenticated(session()),
            AuthAction::SessionExpired,
        );
        assert_eq!(state, AuthState::Anonymous);
        assert!(state.session().is_none());
    }

    // ===== Subscription Gating Tests =====

    fn context_with(subscription: Option<Subscription>) -> SubscriptionContext {
        SubscriptionContext {
            snapshot: SubscriptionSnapshot {
                subscription: subscription.map(Rc::new),
                ..SubscriptionSnapshot::default()
            },
            upgrade: Callback::noop(),
            cancel: Callback::noop(),
        }
    }

    #[test]
    fn test_feature_access_fails_closed_before_load() {
        let context = context_with(None);
        for feature in Feature::all() {
            assert!(!context.has_feature(*feature));
        }
    }

    #[test]
    fn test_feature_access_flips_only_with_refetched_truth() {
        // Before the refetch lands the old snapshot is still in force.
        let before = context_with(None);
        assert!(!before.has_feature(Feature::PdfExport));

        // The provider swaps the snapshot only after the server confirms the
        // upgrade and the subscription is fetched back; with the fetched
        // record in place the gate opens.
        let after = context_with(Some(premium_subscription()));
        assert!(after.has_feature(Feature::PdfExport));
        assert!(after.has_feature(Feature::GapSignals));
        assert!(!after.has_feature(Feature::ExcelExport));
    }
}
