use id3_tree::data::Dataset;
use id3_tree::metrics::confusion::ClassificationMetrics;
use id3_tree::trees::{BuildEvent, Id3Classifier, Node, NoopObserver};
use id3_tree::Id3Error;
use std::path::PathBuf;

fn dataset(name: &str) -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("datasets")
        .join(name);
    Dataset::from_path(path, b',').unwrap()
}

fn assert_partitioned(node: &Node) {
    if node.is_leaf() {
        return;
    }
    let total: usize = node.children().values().map(Node::len).sum();
    assert_eq!(total, node.len());
    for child in node.children().values() {
        assert!(!child.is_empty());
        assert_partitioned(child);
    }
}

#[test]
fn builds_the_classic_tree() {
    let training = dataset("play_tennis.csv");
    let mut classifier = Id3Classifier::new();
    classifier.fit(&training).unwrap();

    let expected = "\
Outlook = Overcast: Yes
Outlook = Rain
|  Wind = Strong: No
|  Wind = Weak: Yes
Outlook = Sunny
|  Humidity = High: No
|  Humidity = Normal: Yes
";
    assert_eq!(classifier.render().unwrap(), expected);

    let root = classifier.root().unwrap();
    assert_eq!(root.depth(), 2);
    assert_eq!(root.leaf_count(), 5);
    assert_partitioned(root);
}

#[test]
fn selected_attribute_has_the_highest_gain() {
    let training = dataset("play_tennis.csv");
    let mut gains = Vec::new();
    let mut selected = Vec::new();
    let mut observer = |event: &BuildEvent<'_>| match *event {
        BuildEvent::CandidateEvaluated { depth: 0, gain, .. } => gains.push(gain),
        BuildEvent::AttributeSelected { depth: 0, attribute, gain } => {
            selected.push((attribute.to_string(), gain))
        }
        _ => {}
    };
    Id3Classifier::new()
        .fit_with_observer(&training, &mut observer)
        .unwrap();

    assert_eq!(gains.len(), 4);
    assert_eq!(selected.len(), 1);
    let (attribute, gain) = &selected[0];
    assert_eq!(attribute, "Outlook");
    assert!(gains.iter().all(|other| gain >= other));
}

#[test]
fn labels_unseen_records_and_keeps_training_data() {
    let training = dataset("play_tennis.csv");
    let before = training.records().to_vec();
    let mut classifier = Id3Classifier::new();
    classifier.fit_with_observer(&training, &mut NoopObserver).unwrap();

    let mut target = dataset("play_tennis_predict.csv");
    classifier.predict(&mut target).unwrap();

    assert_eq!(
        target.column(target.goal_index()).unwrap(),
        ["No", "Yes", "Yes", "No", "Yes"]
    );
    assert_eq!(training.records(), before.as_slice());
}

#[test]
fn scores_a_holdout_split() {
    let labeled = dataset("play_tennis.csv");
    let (training, mut test) = labeled.train_test_split(0.5, Some(3)).unwrap();
    let truth = test.column(test.goal_index()).unwrap();

    let mut classifier = Id3Classifier::new();
    classifier.fit_with_observer(&training, &mut NoopObserver).unwrap();
    classifier.predict(&mut test).unwrap();

    let predicted = test.column(test.goal_index()).unwrap();
    let accuracy = classifier.accuracy(&truth, &predicted).unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(predicted.len(), 7);
}

#[test]
fn rejects_malformed_input() {
    let result = Dataset::from_reader("a,b,a\nx,y,z\n".as_bytes(), b',');
    assert!(matches!(result, Err(Id3Error::DuplicateAttribute(_))));

    let result = Dataset::from_reader("a,b\nx,y,z\n".as_bytes(), b',');
    assert!(matches!(result, Err(Id3Error::RowLength { .. })));
}
