//! Tests for settings loading and failed-action messages

use std::collections::BTreeSet;
use std::io::Write;

use core_kernel::{CoreError, Timezone};
use rust_decimal_macros::dec;

use domain_reverse_withdrawal::adapters::InMemoryFailedActionsStore;
use domain_reverse_withdrawal::{
    formatted_failed_actions, formatted_failed_actions_by_vendor, BillingType, FailedAction, FailedActionsStore,
    ReverseWithdrawalSettings, SettingsProvider,
};
use test_utils::*;

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

mod loading {
    use super::*;

    #[test]
    fn test_file_values_override_defaults() {
        let file = settings_file(
            r#"
billing_type = "by_month"
billing_day = 5
due_period = 10
threshold = "200.50"
failed_actions = ["status_inactive"]
timezone = "Asia/Tokyo"
"#,
        );

        let settings = ReverseWithdrawalSettings::load(Some(file.path())).unwrap();

        assert_eq!(settings.billing_type, BillingType::ByMonth);
        assert_eq!(settings.billing_day, Some(5));
        assert_eq!(settings.due_period, Some(10));
        assert_eq!(settings.threshold, dec!(200.50));
        assert_eq!(settings.failed_actions, vec![FailedAction::StatusInactive]);
        assert_eq!(settings.timezone, Timezone::new(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let file = settings_file("billing_type = \"by_amount\"\n");

        let settings = ReverseWithdrawalSettings::load(Some(file.path())).unwrap();

        assert_eq!(settings, ReverseWithdrawalSettings::default());
    }

    #[test]
    fn test_invalid_billing_day_is_configuration_error() {
        let file = settings_file("billing_day = 30\n");

        let result = ReverseWithdrawalSettings::load(Some(file.path()));

        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            ReverseWithdrawalSettings::load(Some(&path)),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_billing_type_in_file() {
        let file = settings_file("billing_type = \"by_quarter\"\n");

        let settings = ReverseWithdrawalSettings::load(Some(file.path())).unwrap();

        assert_eq!(settings.billing_type().unwrap(), BillingType::Unknown);
    }
}

mod failed_action_messages {
    use super::*;

    #[test]
    fn test_configured_actions_render_in_order() {
        let settings = ReverseWithdrawalSettings::default()
            .with_failed_actions(vec![FailedAction::StatusInactive, FailedAction::EnableCatalogMode]);

        let html = formatted_failed_actions(&settings).unwrap();

        assert!(html.starts_with("<ol><li>Your account will be disabled"));
        assert!(html.ends_with("any of your products.</li></ol>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_no_configured_actions_render_empty() {
        let settings = ReverseWithdrawalSettings::default().with_failed_actions(Vec::new());
        assert_eq!(formatted_failed_actions(&settings).unwrap(), "");
    }

    #[test]
    fn test_all_actions_render() {
        let html = formatted_failed_actions(&SettingsFixtures::all_failed_actions()).unwrap();
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_vendor_actions_use_applied_wording() {
        let store = InMemoryFailedActionsStore::new();
        store
            .set(VendorFixtures::primary(), BTreeSet::from([FailedAction::HideWithdrawMenu]))
            .unwrap();

        let html = formatted_failed_actions_by_vendor(&store, VendorFixtures::primary()).unwrap();
        assert_eq!(
            html,
            format!("<ol><li>{}</li></ol>", FailedAction::HideWithdrawMenu.applied_message())
        );

        let none = formatted_failed_actions_by_vendor(&store, VendorFixtures::other()).unwrap();
        assert_eq!(none, "");
    }

    #[test]
    fn test_settings_failure_propagates() {
        assert!(formatted_failed_actions(&UnavailableSettings).is_err());
    }
}
