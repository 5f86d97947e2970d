use goalboard_core::{
    Document, GoalboardSession, InMemoryParticipantRepository, Participant, ParticipantRegistry,
    ParticipantRepository, ParticipantValidationError, RegistrationError, RegistryError,
    SessionError,
};

#[test]
fn names_differing_only_in_case_are_duplicates() {
    let mut registry = ParticipantRegistry::in_memory();
    registry.register("Alice").unwrap();

    let err = registry.register("alice").unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateName(_)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn blank_names_are_rejected_without_adding_entries() {
    let mut registry = ParticipantRegistry::in_memory();
    for raw in ["", "   ", "\t\n"] {
        let err = registry.register(raw).unwrap_err();
        assert_eq!(err, RegistrationError::EmptyName);
    }
    assert!(registry.is_empty());
    assert!(registry.list().is_empty());
}

#[test]
fn successful_registration_appends_exactly_one_entry_last() {
    let mut registry = ParticipantRegistry::in_memory();
    for name in ["Alice", "Bob", "Carol"] {
        let before = registry.list().len();
        let created = registry.register(name).unwrap();
        let listed = registry.list();
        assert_eq!(listed.len(), before + 1);
        assert_eq!(listed.last().unwrap().id(), created.id());
    }

    let names = registry
        .list()
        .iter()
        .map(|p| p.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn each_participant_gets_an_independent_default_document() {
    let mut registry = ParticipantRegistry::in_memory();
    registry.register("Alice").unwrap();
    registry.register("Bob").unwrap();

    let goals = Document::from_paragraphs(["Run a marathon"]).unwrap();
    registry.update_document("ALICE", goals.clone()).unwrap();

    assert_eq!(registry.find("alice").unwrap().document(), &goals);
    assert_eq!(
        registry.find("bob").unwrap().document(),
        &Document::default()
    );
}

#[test]
fn update_document_for_unknown_participant_is_not_found() {
    let mut registry = ParticipantRegistry::in_memory();
    registry.register("Alice").unwrap();

    let err = registry
        .update_document("Mallory", Document::default())
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[test]
fn registry_accepts_custom_repository() {
    let mut repo = InMemoryParticipantRepository::new();
    repo.insert(Participant::new(" Seeded ").unwrap()).unwrap();

    let mut registry = ParticipantRegistry::new(repo);
    assert!(registry.find("seeded").is_some());
    let err = registry.register("SEEDED").unwrap_err();
    assert_eq!(err, RegistrationError::DuplicateName("Seeded".to_string()));
}

#[test]
fn blank_named_participant_cannot_enter_a_registry() {
    let err = Participant::new("   ").unwrap_err();
    assert_eq!(err, ParticipantValidationError::BlankName);

    let mut repo = InMemoryParticipantRepository::new();
    repo.insert(Participant::new("Alice").unwrap()).unwrap();
    let mut session = GoalboardSession::with_registry(ParticipantRegistry::new(repo));
    session.submit_username("Bob").unwrap();

    assert!(session.registry().find("  ").is_none());
    let err = session.select_participant("  ").unwrap_err();
    assert!(matches!(err, SessionError::ParticipantNotFound(_)));
    assert!(session
        .registry()
        .list()
        .iter()
        .all(|participant| !participant.name().trim().is_empty()));
}
