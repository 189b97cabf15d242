use super::*;

#[test]
fn diabetes_fields_show_sample_values() {
    assert_eq!(DIABETES.placeholder(0), "e.g., 140");
    assert_eq!(DIABETES.placeholder(5), "e.g., 0.627");
    assert_eq!(DIABETES.placeholder(6), "e.g., 50");
}

#[test]
fn other_numeric_fields_use_generic_hint() {
    assert_eq!(BREAST_CANCER.placeholder(0), "Enter value...");
    assert_eq!(HEART_DISEASE.placeholder(9), "Enter value...");
    assert_eq!(DIABETES.placeholder(7), "Enter value...");
}

#[test]
fn pneumonia_result_card_title() {
    assert_eq!(PNEUMONIA.result_title, "Analysis Complete");
    assert_eq!(BREAST_CANCER.result_title, "Analysis Result");
}

#[test]
fn every_screen_is_reachable_by_kind() {
    for spec in SCREENS {
        assert!(std::ptr::eq(screen(spec.kind), spec));
    }
}
