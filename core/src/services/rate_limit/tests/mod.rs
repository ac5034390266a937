mod fixed_window_tests;
