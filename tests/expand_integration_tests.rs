use cumulus::value::Value;
use cumulus::{read, ssm};
use indexmap::IndexMap;
use serde_json::{json, Value as Json};

fn no_params() -> IndexMap<String, Value> {
    IndexMap::new()
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_inline_stack_end_to_end() {
    init_logs();
    let out = read(
        "{MyStack {Resources {Bucket [S3.Bucket {BucketName \"x\"}]}}}",
        "prod",
        &no_params(),
    )
    .unwrap();
    assert_eq!(
        Json::Object(out),
        json!({
            "MyStack": {
                "StackName": "MyStack",
                "TemplateBody": {
                    "Resources": {
                        "Bucket": {
                            "Type": "AWS::S3::Bucket",
                            "Properties": {"BucketName": "x"}
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn test_ssm_params_are_injected_and_extractable() {
    let out = read(
        "{App {Resources #with-ssm-params {Db [RDS.DBInstance {DBName #eid app}]}}}",
        "prod",
        &no_params(),
    )
    .unwrap();

    let resources = &out["App"]["TemplateBody"]["Resources"];
    assert_eq!(
        resources["Db"],
        json!({
            "Type": "AWS::RDS::DBInstance",
            "Properties": {"DBName": "app-prod"}
        })
    );
    assert_eq!(
        resources["DbParam"],
        json!({
            "Type": "AWS::SSM::Parameter",
            "Properties": {"Name": "Db", "Value": {"Ref": "Db"}, "Type": "String"}
        })
    );

    assert_eq!(ssm::parameter_names(&out), ["Db"]);
}

#[test]
fn test_remote_and_inline_stacks_mix() {
    init_logs();
    let out = read(
        concat!(
            "; two stacks, one remote and one inline\n",
            "{Network [\"https://example.com/network.json\" {Parameters #kvp {CidrBlock \"10.0.0.0/16\"}}]\n",
            " Storage {Resources {Bucket [S3.Bucket {BucketName #eid storage}]}}}"
        ),
        "dev",
        &no_params(),
    )
    .unwrap();

    assert_eq!(
        out["Network"],
        json!({
            "StackName": "Network",
            "TemplateURL": "https://example.com/network.json",
            "Parameters": [
                {"ParameterKey": "CidrBlock", "ParameterValue": "10.0.0.0/16"}
            ]
        })
    );
    assert_eq!(
        out["Storage"]["TemplateBody"]["Resources"]["Bucket"]["Properties"]["BucketName"],
        json!("storage-dev")
    );
    assert!(ssm::parameter_names(&out).is_empty());
}

#[test]
fn test_sub_threads_caller_parameters() {
    let mut params = IndexMap::new();
    params.insert("InstanceType".to_string(), Value::String("t3.micro".into()));

    let out = read(
        "{App {Resources {Web [EC2.Instance {InstanceType #sub InstanceType, KeyName #sub Missing}]}}}",
        "prod",
        &params,
    )
    .unwrap();

    let properties = &out["App"]["TemplateBody"]["Resources"]["Web"]["Properties"];
    assert_eq!(properties["InstanceType"], json!("t3.micro"));
    // Absent parameters resolve to null instead of failing the read.
    assert_eq!(properties["KeyName"], Json::Null);
}

#[test]
fn test_identical_input_reads_identically() {
    let text = "{S {Resources {R [S3.Bucket {BucketName #eid data}]}}}";
    let first = read(text, "prod", &no_params()).unwrap();
    let second = read(text, "prod", &no_params()).unwrap();
    assert_eq!(Json::Object(first), Json::Object(second));
}
