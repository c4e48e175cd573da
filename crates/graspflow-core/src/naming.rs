use graspflow_parser::TrialId;

/// The grasped-object label carried in a transform log file name. Names
/// follow `<subject>_<kind>_<object>_<task>_<trial>.csv`; the third
/// underscore token is the object. Files with fewer than four tokens get
/// the placeholder label.
pub fn object_label(file_name: &str) -> String {
    let parts: Vec<&str> = file_name.split('_').collect();
    if parts.len() >= 4 {
        parts[2].to_string()
    } else {
        "Unknown".to_string()
    }
}

/// True for the per-subject experiment timeline file.
pub fn is_event_log(file_name: &str) -> bool {
    file_name.contains("EventLogFile") && file_name.ends_with(".csv")
}

/// True when `file_name` is the transform log for `trial`. The trial id is
/// anchored as the final underscore token, so `config3` never matches a
/// `config31` file.
pub fn is_trial_file(file_name: &str, trial: &TrialId) -> bool {
    let suffix = format!("_{}.csv", trial.as_str());
    file_name.ends_with(&suffix)
}
