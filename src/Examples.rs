pub mod balancer_examples;
