//! Integration tests for requirement files driving the pipeline

use std::fs;

use infragraph::pipeline::*;
use tempfile::tempdir;

const PROJECT: &str = r#"
requirements:
  - id: Req_Arch_001
    type: architecture
    name: Web Shop
    source: main.tf
    output_formats: [dot]

  - id: Req_DFD_001
    type: data_flow
    name: Order Flow
    output_formats: [dot]
    mappings:
      - source: Customer User
        target: Checkout
        data: Order
        protocol: HTTPS
      - source: Checkout
        target: Orders DB
        data: Order row
      - source: Checkout

  - id: Req_BPMN_001
    type: business_process
    name: Returns Process
    output_formats: [dot]
    lanes:
      - name: Customer
      - name: Support
    steps:
      - name: Request
        lane: Customer
        type: start
        next: Review
      - name: Review
        lane: Support
        type: gateway
        conditions:
          - next: Refund
            label: approved
          - next: Done
            label: rejected
      - name: Refund
        lane: Support
        type: task
        next: Done
      - name: Escalate
        lane: Legal
        type: task
      - name: Done
        lane: Customer
        type: end

  - id: Req_X
    type: sequence
    name: Unknown Kind

  - id: Req_DFD_002
    type: data_flow
    name: Nothing Mapped
"#;

const MAIN_TF: &str = r#"
resource "azurerm_service_plan" "shop" {}
resource "azurerm_linux_web_app" "shop-webapp" {}
resource "azurerm_mssql_server" "shop-sql" {}
"#;

#[test]
fn test_project_run() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("project_requirements.yaml");
    fs::write(&config_path, PROJECT).unwrap();

    // relative source paths resolve against the working directory, so use
    // an absolute one here
    let tf = dir.path().join("main.tf");
    fs::write(&tf, MAIN_TF).unwrap();
    let text = fs::read_to_string(&config_path)
        .unwrap()
        .replace("source: main.tf", &format!("source: '{}'", tf.display()));
    fs::write(&config_path, text).unwrap();

    let out = dir.path().join("generated_diagrams");
    let summary = PipelineController::from_config_file(&config_path)
        .with_output_root(&out)
        .run();

    assert_eq!(summary.generated, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);

    let arch = fs::read_to_string(out.join("Req_Arch_001/Req_Arch_001_Web_Shop.dot")).unwrap();
    assert!(arch.contains("\"actor:Users\" -> \"shop-webapp\""));
    assert!(arch.contains("\"shop-webapp\" -> \"shop-sql\""));
    assert!(arch.contains("xlabel=\"shop-plan\""));

    let dfd = fs::read_to_string(out.join("Req_DFD_001/Req_DFD_001_Order_Flow.dot")).unwrap();
    assert!(dfd.contains("digraph \"DFD: Order Flow\""));
    assert!(dfd.contains("\"Customer User\" [label=\"Customer User\", shape=\"parallelogram\"];"));
    assert!(dfd.contains("\"Orders DB\" [label=\"Orders DB\", shape=\"cylinder\"];"));
    assert!(dfd.contains("[label=\"Order\\n(HTTPS)\"]"));
    assert_eq!(dfd.matches("->").count(), 2);

    let bpmn =
        fs::read_to_string(out.join("Req_BPMN_001/Req_BPMN_001_Returns_Process.dot")).unwrap();
    assert!(bpmn.contains("subgraph \"cluster_lane_0_customer\""));
    assert!(bpmn.contains("subgraph \"cluster_lane_1_support\""));
    assert!(bpmn.contains("\"Review\" -> \"Refund\" [label=\"approved\"];"));
    assert!(!bpmn.contains("Escalate"));
    assert_eq!(bpmn.matches("->").count(), 4);

    assert!(!out.join("Req_X").exists());
    assert!(!out.join("Req_DFD_002").exists());
}

#[test]
fn test_malformed_entry_does_not_drop_the_batch() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("project_requirements.yaml");
    fs::write(
        &config_path,
        r#"
requirements:
  - id: Req_BPMN_001
    type: business_process
    name: Broken Steps
    lanes:
      - name: Customer
    steps: ["just a string"]

  - id: Req_DFD_001
    type: data_flow
    name: Order Flow
    output_formats: dot
    mappings:
      - source: Customer User
        target: Checkout
        data: Order
"#,
    )
    .unwrap();

    let out = dir.path().join("generated_diagrams");
    let controller = PipelineController::from_config_file(&config_path).with_output_root(&out);

    let rejected = controller.config().rejected();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id.as_deref(), Some("Req_BPMN_001"));

    let summary = controller.run();
    assert_eq!(
        summary,
        RunSummary {
            generated: 1,
            skipped: 0,
            failed: 1,
        }
    );
    assert!(out.join("Req_DFD_001/Req_DFD_001_Order_Flow.dot").exists());
    assert!(!out.join("Req_BPMN_001").exists());
}

#[test]
fn test_missing_config_is_empty_run() {
    let dir = tempdir().unwrap();
    let summary = PipelineController::from_config_file(&dir.path().join("none.yaml"))
        .with_output_root(dir.path().join("out"))
        .run();
    assert_eq!(summary, RunSummary::default());
}

#[test]
fn test_malformed_config_is_empty_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "requirements:\n  - id: [broken\n").unwrap();
    let controller = PipelineController::from_config_file(&path);
    assert!(controller.config().is_empty());
}

#[test]
fn test_render_failure_is_isolated() {
    let dir = tempdir().unwrap();
    let tf = dir.path().join("main.tf");
    fs::write(&tf, r#"resource "azurerm_storage_account" "data1" {}"#).unwrap();

    // png needs the layout binary, which does not exist here
    let broken = Requirement::new("Broken", RequirementKind::Architecture, "png")
        .with_source(&tf)
        .with_formats(&["png"]);
    let fine = Requirement::new("Fine", RequirementKind::Architecture, "dot")
        .with_source(&tf)
        .with_formats(&["dot"]);

    let emitter = infragraph::GraphvizEmitter::with_executable(dir.path().join("no-such-dot"));
    let out = dir.path().join("out");
    let summary = PipelineController::with_emitter(ProjectConfig::new(vec![broken, fine]), emitter)
        .with_output_root(&out)
        .run();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.generated, 1);
    assert!(out.join("Fine/Fine_dot.dot").exists());
}

#[test]
fn test_init_copies_template_once() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    let template = include_str!("../../../config/requirements_template.yaml");
    fs::write(dir.path().join("config/requirements_template.yaml"), template).unwrap();

    let created = init_project(dir.path()).unwrap();
    let target = dir.path().join(DEFAULT_CONFIG_PATH);
    assert_eq!(created, InitOutcome::Created(target.clone()));

    // the bundled template is a loadable configuration
    let config = ProjectConfig::load(&target);
    assert!(!config.is_empty());
    for requirement in config.requirements() {
        assert!(requirement.kind().is_ok(), "bad type in template: {}", requirement.id);
    }

    assert_eq!(init_project(dir.path()).unwrap(), InitOutcome::AlreadyExists(target));
}

#[test]
fn test_output_layout() {
    let layout = OutputLayout::new("diagrams");
    assert_eq!(
        layout.base_path("Req_DFD_001", "Order Flow"),
        std::path::Path::new("diagrams/Req_DFD_001/Req_DFD_001_Order_Flow")
    );
    assert_eq!(file_stem("R", "a b"), "R_a_b");
}
