mod budget_service_tests;
