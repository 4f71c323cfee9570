mod ontologies;
