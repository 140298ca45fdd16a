use super::*;

fn kernel() -> DeviceKernel {
    DeviceKernel::from_entries(vec![
        DeviceEntry {
            name: "Third-Person Limited".to_string(),
            definition: "Narration bound to one character's perception.".to_string(),
            function: Some("limits the reader to Jonas's perception".to_string()),
        },
        DeviceEntry {
            name: "Reliable Narrator".to_string(),
            definition: "A narrator the reader can trust.".to_string(),
            function: Some("builds reader trust".to_string()),
        },
        DeviceEntry {
            name: "Imagery".to_string(),
            definition: String::new(),
            function: None,
        },
    ])
}

#[test]
fn test_lookup_hit() {
    assert_eq!(
        kernel().lookup("Reliable Narrator"),
        Some("builds reader trust")
    );
}

#[test]
fn test_lookup_miss_is_none_not_error() {
    assert_eq!(kernel().lookup("unknown device"), None);
    // registered device without a function is also a miss
    assert_eq!(kernel().lookup("Imagery"), None);
}

#[test]
fn test_match_exact_and_normalized() {
    let k = kernel();
    let (entry, confidence) = k.match_device("third-person limited").unwrap();
    assert_eq!(entry.name, "Third-Person Limited");
    assert_eq!(confidence, 1.0);

    let (entry, confidence) = k.match_device("Third Person Limited!").unwrap();
    assert_eq!(entry.name, "Third-Person Limited");
    assert!(confidence >= 0.95);
}

#[test]
fn test_match_via_alias() {
    let k = kernel();
    let (entry, _) = k.match_device("pov").unwrap();
    assert_eq!(entry.name, "Third-Person Limited");
}

#[test]
fn test_match_via_word_overlap() {
    let k = kernel();
    let (entry, confidence) = k.match_device("limited third person view").unwrap();
    assert_eq!(entry.name, "Third-Person Limited");
    assert!(confidence >= 0.5 && confidence < 0.95);
}

#[test]
fn test_identify_from_topics() {
    let k = kernel();
    let topics = vec!["reliable narrator".to_string()];
    let entry = k.identify("some text", &topics).unwrap();
    assert_eq!(entry.name, "Reliable Narrator");
}

#[test]
fn test_identify_from_text_body() {
    let k = kernel();
    let entry = k
        .identify("The imagery in this chapter stays cold.", &[])
        .unwrap();
    assert_eq!(entry.name, "Imagery");
}

#[test]
fn test_identify_nothing_on_empty_kernel() {
    let k = DeviceKernel::from_entries(Vec::new());
    assert!(k.is_empty());
    assert!(k.identify("reliable narrator text", &["reliable narrator".to_string()]).is_none());
}

#[test]
fn test_first_instance_wins_on_duplicate_names() {
    let k = DeviceKernel::from_entries(vec![
        DeviceEntry {
            name: "Imagery".to_string(),
            definition: "first".to_string(),
            function: Some("primary definition".to_string()),
        },
        DeviceEntry {
            name: "imagery".to_string(),
            definition: "second".to_string(),
            function: Some("duplicate".to_string()),
        },
    ]);
    assert_eq!(k.lookup("imagery"), Some("primary definition"));
}
