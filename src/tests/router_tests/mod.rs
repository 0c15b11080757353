mod retrieval_tests;
