mod appointments_test;
mod doctors_test;
mod specializations_test;
mod test_utils;
