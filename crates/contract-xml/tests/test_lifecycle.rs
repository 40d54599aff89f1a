//! Lifecycle hook ordering and mutation semantics.

mod common;

use std::sync::{Arc, Mutex};

use common::{NS, RecordingSink, class, contract_set, int, string};
use helios_contract::{
    ClassContract, ContractError, DataMember, LifecycleHook, ObjectValue, QualifiedName,
    StreamingState, Value,
};
use helios_contract_xml::{Result, WriteError, WriterSettings, XmlWriteContext, write_class};

type Log = Arc<Mutex<Vec<String>>>;

fn logging_hook(log: &Log, entry: &str) -> LifecycleHook {
    let log = Arc::clone(log);
    let entry = entry.to_string();
    LifecycleHook::new(move |_, _| {
        log.lock().unwrap().push(entry.clone());
        Ok(())
    })
}

fn hooked_chain(log: &Log) -> (Arc<ClassContract>, Arc<ClassContract>) {
    let base = Arc::new(
        ClassContract::builder(class("Base"), QualifiedName::new("Base", NS))
            .member(DataMember::new("X", int()))
            .on_serializing(logging_hook(log, "base:serializing"))
            .on_serialized(logging_hook(log, "base:serialized"))
            .build()
            .unwrap(),
    );
    let derived = Arc::new(
        ClassContract::builder(class("Derived"), QualifiedName::new("Derived", NS))
            .base(base.clone())
            .member(DataMember::new("Y", string()))
            .on_serializing(logging_hook(log, "derived:serializing"))
            .on_serialized(logging_hook(log, "derived:serialized"))
            .build()
            .unwrap(),
    );
    (base, derived)
}

#[test]
fn test_hooks_run_base_first_in_both_phases() -> Result<()> {
    let log: Log = Arc::default();
    let (base, derived) = hooked_chain(&log);
    let contracts = contract_set(&[&base, &derived]);
    let settings = WriterSettings::default();
    let value = Value::Object(
        ObjectValue::new(class("Derived"))
            .with_field("X", 1)
            .with_field("Y", "a"),
    );

    write_class(
        &mut RecordingSink::new(),
        &value,
        &mut XmlWriteContext::new(&contracts, &settings),
        &derived,
    )?;

    // post-serialize hooks keep the base-first order of the pre-serialize walk
    assert_eq!(
        *log.lock().unwrap(),
        [
            "base:serializing",
            "derived:serializing",
            "base:serialized",
            "derived:serialized"
        ]
    );
    Ok(())
}

#[test]
fn test_members_are_read_after_pre_serialize_hooks() -> Result<()> {
    let contract = ClassContract::builder(class("Counter"), QualifiedName::new("Counter", NS))
        .member(DataMember::new("Value", int()))
        .on_serializing(LifecycleHook::new(|value, _| {
            if let Some(object) = value.as_object_mut() {
                object.set_field("Value", 42);
            }
            Ok(())
        }))
        .build()?;
    let contracts = contract_set(&[]);
    let settings = WriterSettings::default();
    let value = Value::Object(ObjectValue::new(class("Counter")).with_field("Value", 1));
    let mut sink = RecordingSink::new();

    write_class(&mut sink, &value, &mut XmlWriteContext::new(&contracts, &settings), &contract)?;

    assert_eq!(sink.texts(), ["42"]);
    assert_eq!(value.as_object().unwrap().field("Value"), Some(&Value::I32(1)));
    Ok(())
}

#[test]
fn test_hooks_receive_configured_streaming_state() -> Result<()> {
    let seen = Arc::new(Mutex::new(None));
    let recorder = Arc::clone(&seen);
    let contract = ClassContract::builder(class("Empty"), QualifiedName::new("Empty", NS))
        .on_serializing(LifecycleHook::new(move |_, context| {
            *recorder.lock().unwrap() = Some(context.state);
            Ok(())
        }))
        .build()?;
    let contracts = contract_set(&[]);
    let settings = WriterSettings {
        streaming_state: StreamingState::CrossMachine,
        ..WriterSettings::default()
    };

    write_class(
        &mut RecordingSink::new(),
        &Value::Object(ObjectValue::new(class("Empty"))),
        &mut XmlWriteContext::new(&contracts, &settings),
        &contract,
    )?;

    assert_eq!(*seen.lock().unwrap(), Some(StreamingState::CrossMachine));
    Ok(())
}

#[test]
fn test_hook_failure_stops_the_write() {
    let contract = ClassContract::builder(class("Broken"), QualifiedName::new("Broken", NS))
        .member(DataMember::new("X", int()))
        .on_serializing(LifecycleHook::new(|_, _| {
            Err(ContractError::Hook("not ready".to_string()))
        }))
        .build()
        .unwrap();
    let contracts = contract_set(&[]);
    let settings = WriterSettings::default();
    let mut sink = RecordingSink::new();

    let result = write_class(
        &mut sink,
        &Value::Object(ObjectValue::new(class("Broken")).with_field("X", 1)),
        &mut XmlWriteContext::new(&contracts, &settings),
        &contract,
    );

    assert!(matches!(
        result,
        Err(WriteError::Contract(ContractError::Hook(message))) if message == "not ready"
    ));
    assert!(sink.events.is_empty());
}
