//! Evaluator integration tests
//!
//! Tests the full pipeline: source → lex → parse → eval

use pretty_assertions::assert_eq;
use silex::{SilexError, Value};

/// Helper to interpret source in a fresh global environment
fn interpret(source: &str) -> Result<Value, SilexError> {
    silex::interpret(source)
}

/// Helper to check the canonical printed form of the result
fn assert_result(source: &str, expected: &str) {
    match interpret(source) {
        Ok(value) => assert_eq!(value.to_string(), expected, "for source: {source}"),
        Err(e) => panic!("Evaluation failed for {source}: {e}"),
    }
}

/// Helper to get the error a source is expected to produce
fn eval_err(source: &str) -> SilexError {
    match interpret(source) {
        Ok(value) => panic!("Expected error for {source}, got {value}"),
        Err(e) => e,
    }
}

// ==================== Self-Evaluation ====================

#[test]
fn test_numbers_evaluate_to_themselves() {
    assert_result("42", "42");
    assert_result("-7", "-7");
    assert_result("3.5", "3.5");
}

#[test]
fn test_strings_evaluate_to_themselves() {
    assert_result("\"hello\"", "\"hello\"");
    assert_result("\"\"", "\"\"");
}

#[test]
fn test_booleans_evaluate_to_themselves() {
    assert_result("#t", "#t");
    assert_result("#f", "#f");
}

#[test]
fn test_evaluating_nil_is_prohibited() {
    assert!(matches!(eval_err("()"), SilexError::EvalNil));
}

// ==================== Symbol Resolution ====================

#[test]
fn test_bound_symbol_resolves() {
    assert_result("(begin (define x 5) x)", "5");
}

#[test]
fn test_symbol_resolves_through_parent_chain() {
    assert_result("(begin (define x 7) ((lambda () x)))", "7");
}

#[test]
fn test_unbound_symbol_fails() {
    let err = eval_err("nope");
    assert!(matches!(err, SilexError::UnboundVariable { ref name } if name == "nope"));
}

// ==================== quote ====================

#[test]
fn test_quote_returns_datum_verbatim() {
    assert_result("(quote x)", "x");
    assert_result("'(1 2 (3 4))", "(1 2 (3 4))");
    // no sub-evaluation happens
    assert_result("'(+ 1 2)", "(+ 1 2)");
    assert_result("'(undefined-name)", "(undefined-name)");
}

#[test]
fn test_quote_wrong_shape() {
    assert!(matches!(eval_err("(quote)"), SilexError::Syntax { .. }));
    assert!(matches!(eval_err("(quote a b)"), SilexError::Syntax { .. }));
}

// ==================== if ====================

#[test]
fn test_if_false_takes_else_branch() {
    assert_result("(if #f 1 2)", "2");
}

#[test]
fn test_if_true_takes_then_branch() {
    assert_result("(if #t 1 2)", "1");
}

#[test]
fn test_if_missing_else_yields_nil() {
    assert_result("(if #f 1)", "()");
}

#[test]
fn test_falsity_is_exactly_hash_f() {
    // 0, the empty list, and the empty string are all true
    assert_result("(if 0 'yes 'no)", "yes");
    assert_result("(if '() 'yes 'no)", "yes");
    assert_result("(if \"\" 'yes 'no)", "yes");
}

#[test]
fn test_if_does_not_evaluate_untaken_branch() {
    assert_result("(if #t 'ok (error \"boom\"))", "ok");
    assert_result("(if #f (error \"boom\") 'ok)", "ok");
}

// ==================== define ====================

#[test]
fn test_define_echoes_the_name() {
    assert_result("(define x 5)", "x");
}

#[test]
fn test_define_procedure_sugar() {
    assert_result("(begin (define (double x) (+ x x)) (double 21))", "42");
}

#[test]
fn test_define_rebinding_overwrites() {
    assert_result("(begin (define x 1) (define x 2) x)", "2");
}

#[test]
fn test_internal_define_stays_local() {
    let source = "(begin
                    (define (f) (define hidden 1) hidden)
                    (f)
                    hidden)";
    assert!(matches!(
        eval_err(source),
        SilexError::UnboundVariable { .. }
    ));
}

#[test]
fn test_define_wrong_shape() {
    assert!(matches!(eval_err("(define 3 4)"), SilexError::Syntax { .. }));
    assert!(matches!(eval_err("(define x)"), SilexError::Syntax { .. }));
}

// ==================== lambda and closures ====================

#[test]
fn test_lambda_application() {
    assert_result("((lambda (a b) (+ a b)) 1 2)", "3");
}

#[test]
fn test_lambda_body_runs_in_sequence_returning_last() {
    assert_result("((lambda () 1 2 3))", "3");
}

#[test]
fn test_lambda_prints_opaquely() {
    assert_result("(lambda (x) x)", "#<procedure>");
}

#[test]
fn test_lambda_rejects_non_symbol_parameter() {
    assert!(matches!(
        eval_err("(lambda (a 1) a)"),
        SilexError::Syntax { .. }
    ));
}

#[test]
fn test_closures_capture_environment_by_reference() {
    let source = "(begin
                    (define (make-counter)
                      (define n 0)
                      (lambda () (set! n (+ n 1)) n))
                    (define tick (make-counter))
                    (list (tick) (tick) ((make-counter))))";
    // two calls to one instance count up; a fresh instance starts over
    assert_result(source, "(1 2 1)");
}

#[test]
fn test_closure_sees_later_definitions() {
    // capture is by reference, not by copy
    assert_result("(begin (define (f) late) (define late 42) (f))", "42");
}

#[test]
fn test_computed_operator_position() {
    assert_result(
        "(begin
           (define (pick b) ((if (> b 0) + -) 10 b))
           (list (pick 3) (pick -3)))",
        "(13 13)",
    );
}

#[test]
fn test_arity_mismatch_both_directions() {
    assert!(matches!(
        eval_err("((lambda (a b) a) 1)"),
        SilexError::Arity { .. }
    ));
    assert!(matches!(
        eval_err("((lambda (a b) a) 1 2 3)"),
        SilexError::Arity { .. }
    ));
}

// ==================== and / or ====================

#[test]
fn test_empty_and_or() {
    assert_result("(and)", "#t");
    assert_result("(or)", "#f");
}

#[test]
fn test_and_returns_last_value() {
    assert_result("(and 1 2 3)", "3");
}

#[test]
fn test_and_short_circuits() {
    assert_result("(and #f (error \"boom\"))", "#f");
}

#[test]
fn test_or_returns_first_truthy_value() {
    assert_result("(or #f 2 3)", "2");
    assert_result("(or #f #f)", "#f");
}

#[test]
fn test_or_short_circuits() {
    assert_result("(or 1 (error \"boom\"))", "1");
}

// ==================== cond ====================

#[test]
fn test_cond_picks_first_matching_clause() {
    assert_result("(cond (#f 1) (#t 2) (#t 3))", "2");
}

#[test]
fn test_cond_else_always_matches() {
    assert_result("(cond (#f 1) (else 9))", "9");
}

#[test]
fn test_cond_else_must_be_last() {
    assert!(matches!(
        eval_err("(cond (else 1) (#t 2))"),
        SilexError::Syntax { .. }
    ));
}

#[test]
fn test_cond_test_only_clause_returns_test_value() {
    assert_result("(cond (#f) (42))", "42");
}

#[test]
fn test_cond_clause_body_runs_in_sequence() {
    assert_result(
        "(begin (define x 0) (cond (#t (set! x 1) (+ x 10))))",
        "11",
    );
}

#[test]
fn test_cond_no_match_yields_nil() {
    assert_result("(cond (#f 1) (#f 2))", "()");
}

// ==================== begin ====================

#[test]
fn test_begin_returns_last() {
    assert_result("(begin 1 2 3)", "3");
}

#[test]
fn test_empty_begin_is_an_error() {
    assert!(matches!(eval_err("(begin)"), SilexError::Syntax { .. }));
}

// ==================== let ====================

#[test]
fn test_let_binds_and_evaluates_body() {
    assert_result("(let ((x 1) (y 2)) (+ x y))", "3");
}

#[test]
fn test_let_bindings_are_simultaneous() {
    // y's initializer runs in the outer scope, where x is unbound
    assert!(matches!(
        eval_err("(let ((x 1) (y x)) y)"),
        SilexError::UnboundVariable { .. }
    ));
}

#[test]
fn test_let_shadows_outer_binding() {
    assert_result("(begin (define x 1) (list (let ((x 2)) x) x))", "(2 1)");
}

#[test]
fn test_let_initializers_see_outer_scope() {
    assert_result("(begin (define x 1) (let ((x (+ x 10))) x))", "11");
}

#[test]
fn test_let_wrong_shape() {
    assert!(matches!(
        eval_err("(let ((x 1 2)) x)"),
        SilexError::Syntax { .. }
    ));
    assert!(matches!(
        eval_err("(let ((1 2)) 3)"),
        SilexError::Syntax { .. }
    ));
}

// ==================== quasiquote / unquote ====================

#[test]
fn test_quasiquote_without_unquote_is_quote() {
    assert_result("`(1 2 3)", "(1 2 3)");
    assert_result("`x", "x");
}

#[test]
fn test_quasiquote_substitutes_unquote() {
    assert_result("`(1 ,(+ 1 1) 3)", "(1 2 3)");
}

#[test]
fn test_quasiquote_recurses_into_nested_lists() {
    assert_result("`(a (b ,(+ 1 2)))", "(a (b 3))");
    assert_result("`(1 (2 (3 ,(* 2 2))))", "(1 (2 (3 4)))");
}

#[test]
fn test_unquote_whole_template() {
    assert_result("`,(+ 1 2)", "3");
}

#[test]
fn test_unquote_outside_quasiquote_is_an_error() {
    assert!(matches!(eval_err(",x"), SilexError::Syntax { .. }));
    assert!(matches!(eval_err("(unquote 1)"), SilexError::Syntax { .. }));
}

// ==================== set! ====================

#[test]
fn test_set_mutates_existing_binding() {
    assert_result("(begin (define x 1) (set! x 2) x)", "2");
}

#[test]
fn test_set_reaches_the_owning_frame() {
    assert_result(
        "(begin (define x 1) (define (bump) (set! x (+ x 1))) (bump) (bump) x)",
        "3",
    );
}

#[test]
fn test_set_on_unbound_variable_fails() {
    assert!(matches!(
        eval_err("(set! ghost 1)"),
        SilexError::UnboundVariable { .. }
    ));
}

// ==================== Application Errors ====================

#[test]
fn test_calling_a_non_procedure_fails() {
    let err = eval_err("(1 2 3)");
    assert!(matches!(err, SilexError::NotAProcedure { ref found } if found == "1"));
}

#[test]
fn test_improper_list_call_form_is_malformed() {
    assert!(matches!(
        eval_err("(+ 1 . 2)"),
        SilexError::MalformedList { .. }
    ));
}

// ==================== Builtins: Arithmetic ====================

#[test]
fn test_arithmetic() {
    assert_result("(+ 1 2 3)", "6");
    assert_result("(+)", "0");
    assert_result("(- 10 4)", "6");
    assert_result("(- 5)", "-5");
    assert_result("(* 2 3 4)", "24");
    assert_result("(*)", "1");
    assert_result("(/ 10 4)", "2.5");
    assert_result("(/ 2)", "0.5");
    assert_result("(abs -3)", "3");
    assert_result("(expt 2 10)", "1024");
}

#[test]
fn test_integer_division_family() {
    assert_result("(quotient 7 2)", "3");
    assert_result("(quotient -7 2)", "-3");
    assert_result("(remainder 7 2)", "1");
    assert_result("(remainder -7 2)", "-1");
    assert_result("(modulo 7 2)", "1");
    assert_result("(modulo -7 2)", "1");
    assert_result("(modulo 7 -2)", "-1");
}

#[test]
fn test_arithmetic_type_errors() {
    assert!(matches!(eval_err("(+ 1 'a)"), SilexError::Type { .. }));
    assert!(matches!(eval_err("(< 1 \"x\")"), SilexError::Type { .. }));
}

// ==================== Builtins: Pairs and Lists ====================

#[test]
fn test_car_cdr_cons() {
    assert_result("(car '(1 2 3))", "1");
    assert_result("(cdr '(1 2 3))", "(2 3)");
    assert_result("(cons 1 2)", "(1 . 2)");
    assert_result("(cons 1 '(2 3))", "(1 2 3)");
}

#[test]
fn test_car_of_non_pair_fails() {
    assert!(matches!(eval_err("(car 5)"), SilexError::Type { .. }));
    assert!(matches!(eval_err("(cdr '())"), SilexError::Type { .. }));
}

#[test]
fn test_list_length_append() {
    assert_result("(list 1 2 3)", "(1 2 3)");
    assert_result("(list)", "()");
    assert_result("(length '(a b c))", "3");
    assert_result("(length '())", "0");
    assert_result("(append '(1 2) '(3) '() '(4))", "(1 2 3 4)");
}

#[test]
fn test_length_of_improper_list_fails() {
    assert!(matches!(
        eval_err("(length '(1 . 2))"),
        SilexError::MalformedList { .. }
    ));
}

#[test]
fn test_map_filter_reduce() {
    assert_result("(map (lambda (x) (* x x)) '(1 2 3))", "(1 4 9)");
    assert_result("(filter odd? '(1 2 3 4 5))", "(1 3 5)");
    assert_result("(reduce + '(1 2 3 4))", "10");
    assert_result("(map car '((1 2) (3 4)))", "(1 3)");
}

#[test]
fn test_reduce_of_empty_list_fails() {
    assert!(matches!(eval_err("(reduce + '())"), SilexError::Type { .. }));
}

// ==================== Builtins: Predicates ====================

#[test]
fn test_type_predicates() {
    assert_result("(atom? 1)", "#t");
    assert_result("(atom? '(1))", "#f");
    assert_result("(boolean? #f)", "#t");
    assert_result("(integer? 4)", "#t");
    assert_result("(integer? 4.5)", "#f");
    assert_result("(integer? 'a)", "#f");
    assert_result("(list? '(1 2))", "#t");
    assert_result("(list? '(1 . 2))", "#f");
    assert_result("(list? '())", "#t");
    assert_result("(number? 3)", "#t");
    assert_result("(number? \"3\")", "#f");
    assert_result("(null? '())", "#t");
    assert_result("(null? '(1))", "#f");
    assert_result("(pair? '(1))", "#t");
    assert_result("(pair? '())", "#f");
    assert_result("(procedure? car)", "#t");
    assert_result("(procedure? (lambda (x) x))", "#t");
    assert_result("(procedure? 'car)", "#f");
    assert_result("(string? \"s\")", "#t");
    assert_result("(symbol? 'a)", "#t");
}

// ==================== Builtins: Comparison ====================

#[test]
fn test_numeric_comparison() {
    assert_result("(= 2 2)", "#t");
    assert_result("(< 1 2)", "#t");
    assert_result("(> 1 2)", "#f");
    assert_result("(<= 2 2)", "#t");
    assert_result("(>= 1 2)", "#f");
    assert_result("(zero? 0)", "#t");
    assert_result("(zero? 1)", "#f");
    assert_result("(odd? 3)", "#t");
    assert_result("(odd? 2.5)", "#f");
    assert_result("(even? 4)", "#t");
}

#[test]
fn test_eq_is_identity_equal_is_structure() {
    assert_result("(eq? 'a 'a)", "#t");
    assert_result("(eq? 2 2)", "#t");
    assert_result("(eq? '() '())", "#t");
    // two separately-built lists are equal but not identical
    assert_result("(eq? (list 1 2) (list 1 2))", "#f");
    assert_result("(equal? (list 1 2) (list 1 2))", "#t");
    assert_result("(begin (define l (list 1 2)) (eq? l l))", "#t");
    assert_result("(equal? '(1 (2 3)) '(1 (2 3)))", "#t");
    assert_result("(equal? '(1 2) '(1 3))", "#f");
}

#[test]
fn test_not() {
    assert_result("(not #f)", "#t");
    assert_result("(not 0)", "#f");
    assert_result("(not '())", "#f");
}

// ==================== Builtins: Core ====================

#[test]
fn test_apply_builtin() {
    assert_result("(apply + '(1 2 3))", "6");
    assert_result("(apply (lambda (a b) (* a b)) '(6 7))", "42");
}

#[test]
fn test_eval_builtin() {
    assert_result("(eval '(+ 1 2))", "3");
    assert_result("(begin (define code '(if #t 'yes 'no)) (eval code))", "yes");
}

#[test]
fn test_error_builtin_raises() {
    let err = eval_err("(error \"boom\")");
    assert!(matches!(err, SilexError::Raised { ref message } if message.contains("boom")));
}

#[test]
fn test_display_returns_nil() {
    assert_result("(display \"x\")", "()");
}

// ==================== Programs ====================

#[test]
fn test_recursive_factorial() {
    assert_result(
        "(begin
           (define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))
           (fact 10))",
        "3628800",
    );
}

#[test]
fn test_mutual_recursion_through_global_frame() {
    assert_result(
        "(begin
           (define (even-n? n) (if (= n 0) #t (odd-n? (- n 1))))
           (define (odd-n? n) (if (= n 0) #f (even-n? (- n 1))))
           (list (even-n? 10) (odd-n? 10)))",
        "(#t #f)",
    );
}

#[test]
fn test_higher_order_compose() {
    assert_result(
        "(begin
           (define (compose f g) (lambda (x) (f (g x))))
           (define add1 (lambda (x) (+ x 1)))
           ((compose add1 add1) 40))",
        "42",
    );
}
