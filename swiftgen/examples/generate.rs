//! Example generating Swift sources from a UML model.
//!
//! Run with: `cargo run --example generate -- [MODEL.xml] [OUT_DIR]`
//!
//! Without a model file a small built-in model is generated.

use std::path::PathBuf;
use swiftgen::prelude::*;

/// Builds a model with a storage singleton, a handler realizing a delegate
/// protocol, and a status enumeration.
fn demo_model() -> Model {
    let mut model = Model::new("Main");
    let root = model.root();
    let src = model.add_package(root, "src");

    let storage_pkg = model.add_package(src, "storage");
    let storage = model.add_class(storage_pkg, "AccountStorage", ClassifierDef::new());
    let mut shared = OperationDef::new();
    shared.is_static = true;
    shared.visibility = Visibility::Public;
    shared.add_parameter(Parameter::returns(TypeRef::Element(storage)));
    model.add_operation(storage, "sharedInstance", shared);

    let login_pkg = model.add_package(src, "login");
    let delegate = model.add_interface(login_pkg, "LoginViewDelegate", ClassifierDef::new());
    let mut bind = OperationDef::new();
    bind.visibility = Visibility::Public;
    for name in ["control", "action", "event"] {
        bind.add_parameter(Parameter::input(name, TypeRef::named("id")));
    }
    model.add_operation(delegate, "bindTarget", bind);

    let handler_pkg = model.add_package(src, "handler");
    let handler = model.add_class(handler_pkg, "AccountHandler", ClassifierDef::new());
    model.add_realization(handler, delegate);
    let mut name = AttributeDef::new(TypeRef::named("string"));
    name.visibility = Visibility::Public;
    model.add_attribute(handler, "userName", name);
    let mut login = OperationDef::new();
    login.visibility = Visibility::Public;
    login.add_parameter(Parameter::input("password", TypeRef::named("String")));
    login.add_parameter(Parameter::returns(TypeRef::named("boolean")));
    model.add_operation(handler, "login", login);

    model.add_enumeration(
        handler_pkg,
        "LoginState",
        EnumerationDef::new(["loggedOut", "loggingIn", "loggedIn"]),
    );
    model
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let model_path = args.next().map(PathBuf::from);
    let output = args.next().map_or_else(|| PathBuf::from("swift-out"), PathBuf::from);
    std::fs::create_dir_all(&output)?;

    let model = match &model_path {
        Some(path) => load_model(path)?,
        None => demo_model(),
    };
    let root = model.root();
    let project = ProjectInfo::named(model.name_of(root));

    let report = generate(&model, root, &output, &GenOptions::default(), project)?;

    println!(
        "Generated {} files in {} directories under {}",
        report.files.len(),
        report.directories.len(),
        output.display()
    );
    for file in &report.files {
        println!("  {}", file.display());
    }
    Ok(())
}
