/// Unit tests for DiError display and the message catalog

use di_kernel::{messages, DiError, DiResult};
use std::error::Error;

#[test]
fn test_error_display_invalid_binding_type() {
    let error = DiError::InvalidBindingType("INinja".into());
    assert_eq!(error.to_string(), "Invalid binding type: INinja");
    assert!(error.to_string().starts_with(messages::INVALID_BINDING_TYPE));
}

#[test]
fn test_error_display_circular() {
    let error = DiError::CircularDependency(vec!["ServiceA".into(), "ServiceB".into(), "ServiceA".into()]);
    assert_eq!(error.to_string(), "Circular dependency found: ServiceA -> ServiceB -> ServiceA");
}

#[test]
fn test_error_display_lookup_failures() {
    assert_eq!(
        DiError::NotRegistered("IKatana".into()).to_string(),
        "No matching bindings found for serviceIdentifier: IKatana"
    );
    assert_eq!(
        DiError::AmbiguousMatch("IWeapon".into()).to_string(),
        "Ambiguous match found for serviceIdentifier: IWeapon"
    );
    assert_eq!(
        DiError::CannotUnbind("IShuriken".into()).to_string(),
        "Could not unbind serviceIdentifier: IShuriken"
    );
}

#[test]
fn test_error_display_other_variants() {
    assert_eq!(
        DiError::TypeMismatch("alloc::string::String".into()).to_string(),
        "Type mismatch for: alloc::string::String"
    );
    assert_eq!(
        DiError::MissingArgument {
            implementation: "Katana",
            argument: "blade".into(),
        }
        .to_string(),
        "Missing argument 'blade' for implementation Katana"
    );
    assert_eq!(DiError::DepthExceeded(8).to_string(), "Max plan depth 8 exceeded");
    assert_eq!(DiError::NoActivePlan.to_string(), "No active plan in resolution context");
    assert_eq!(
        DiError::InvalidConfiguration("bad".into()).to_string(),
        "Invalid configuration: bad"
    );
}

#[test]
fn test_error_trait_and_equality() {
    let error = DiError::NotRegistered("A".into());
    assert!(error.source().is_none());
    assert_eq!(error.clone(), error);
    assert_ne!(error, DiError::NotRegistered("B".into()));

    let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
    assert!(boxed.to_string().contains("A"));
}

#[test]
fn test_di_result_propagates_with_question_mark() {
    fn inner() -> DiResult<u32> {
        Err(DiError::NoActivePlan)
    }
    fn outer() -> DiResult<u32> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert_eq!(outer(), Err(DiError::NoActivePlan));
}
