use graspflow_core::naming::{is_event_log, is_trial_file, object_label};
use graspflow_parser::TrialId;

#[test]
fn object_label_is_the_third_token() {
    assert_eq!(
        object_label("User0_TransformLog_BigCube_Grasp_config19.csv"),
        "BigCube"
    );
    assert_eq!(
        object_label("User12_TransformLog_Sphere_Release_config3.csv"),
        "Sphere"
    );
}

#[test]
fn object_label_falls_back_for_short_names() {
    assert_eq!(object_label("TransformLog_config3.csv"), "Unknown");
    assert_eq!(object_label("a_b_c"), "Unknown");
    assert_eq!(object_label("plain.csv"), "Unknown");
}

#[test]
fn event_logs_are_recognized_by_name() {
    assert!(is_event_log("User0_EventLogFile_Grasp.csv"));
    assert!(!is_event_log("User0_EventLog_Grasp.csv"));
    assert!(!is_event_log("User0_EventLogFile_Grasp.txt"));
    assert!(!is_event_log("User0_TransformLog_BigCube_Grasp_config3.csv"));
}

#[test]
fn trial_matching_is_anchored_on_the_suffix() {
    let trial = TrialId::new("config3").unwrap();
    assert!(is_trial_file(
        "User0_TransformLog_BigCube_Grasp_config3.csv",
        &trial
    ));
    assert!(!is_trial_file(
        "User0_TransformLog_BigCube_Grasp_config31.csv",
        &trial
    ));
    assert!(!is_trial_file("User0_EventLogFile_Grasp.csv", &trial));
    assert!(!is_trial_file("config3.csv", &trial));
}
