//! Java declaration parser
//!
//! Parses the token stream of one Java source file into a
//! [`CompilationUnit`]. Only class and interface declarations are modeled.
//! Enum, record and annotation type declarations contribute the classes and
//! interfaces declared in their bodies. Method, constructor and initializer
//! blocks are scanned for local class declarations; everything else in them is
//! skipped by bracket matching.

use tracing::{debug, span, trace, Level};

use super::lexer::{tokenize, Spanned, Token};
use crate::core::{
    CompilationUnit, DiagramError, FieldDecl, MethodDecl, TypeDeclaration, TypeExpr, TypeKind,
    TypeShape,
};

type ParseResult<T> = Result<T, DiagramError>;

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
];

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Parser for Java source files
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one source file
    pub fn parse(&self, source: &str) -> Result<CompilationUnit, DiagramError> {
        let parse_span = span!(Level::DEBUG, "parse_java", input_len = source.len());
        let _enter = parse_span.enter();

        let tokens = tokenize(source)?;
        trace!(token_count = tokens.len(), "Tokenized source");

        let unit = Cursor::new(source, tokens).compilation_unit()?;
        debug!(
            package = unit.package.as_deref().unwrap_or(""),
            declarations = unit.declaration_count(),
            "Parsed compilation unit"
        );
        Ok(unit)
    }

    pub fn name(&self) -> &'static str {
        "java"
    }
}

struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<Spanned<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str, tokens: Vec<Spanned<'a>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).map(|(token, _)| *token)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek() == Some(Token::Punct(c))
    }

    fn at_ident(&self, s: &str) -> bool {
        self.peek() == Some(Token::Ident(s))
    }

    fn eat_punct(&mut self, c: char) -> bool {
        let matched = self.at_punct(c);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn eat_ident(&mut self, s: &str) -> bool {
        let matched = self.at_ident(s);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn error(&self, expected: &str) -> DiagramError {
        let offset = self
            .tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len());
        let found = self
            .peek()
            .map(|token| token.to_string())
            .unwrap_or_else(|| "end of input".to_string());
        DiagramError::parse_error_at(format!("expected {}, found {}", expected, found), self.source, offset)
    }

    fn expect_punct(&mut self, c: char) -> ParseResult<()> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", c)))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<&'a str> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    /// Skip from an opening bracket to just past its matching closer
    fn skip_balanced(&mut self, open: char, close: char) -> ParseResult<()> {
        self.expect_punct(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                Some(Token::Punct(c)) if c == open => depth += 1,
                Some(Token::Punct(c)) if c == close => depth -= 1,
                Some(_) => {}
                None => return Err(self.error(&format!("'{}'", close))),
            }
        }
        Ok(())
    }

    fn qualified_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_ident()?.to_string();
        while self.at_punct('.') {
            match self.peek_at(1) {
                Some(Token::Ident(part)) => {
                    self.pos += 2;
                    name.push('.');
                    name.push_str(part);
                }
                Some(Token::Punct('*')) => {
                    self.pos += 2;
                    name.push_str(".*");
                    break;
                }
                _ => break,
            }
        }
        Ok(name)
    }

    fn at_annotation(&self) -> bool {
        self.at_punct('@') && self.peek_at(1) != Some(Token::Ident("interface"))
    }

    fn annotation(&mut self) -> ParseResult<()> {
        self.expect_punct('@')?;
        self.qualified_name()?;
        if self.at_punct('(') {
            self.skip_balanced('(', ')')?;
        }
        Ok(())
    }

    /// Consume annotations and modifiers, returning the modifier keywords
    fn modifiers(&mut self) -> ParseResult<Vec<&'a str>> {
        let mut modifiers = Vec::new();
        loop {
            if self.at_annotation() {
                self.annotation()?;
                continue;
            }
            match self.peek() {
                Some(Token::Ident(word)) if MODIFIERS.contains(&word) => {
                    self.pos += 1;
                    modifiers.push(word);
                }
                Some(Token::Ident("non"))
                    if self.peek_at(1) == Some(Token::Punct('-'))
                        && self.peek_at(2) == Some(Token::Ident("sealed")) =>
                {
                    self.pos += 3;
                    modifiers.push("non-sealed");
                }
                _ => return Ok(modifiers),
            }
        }
    }

    fn compilation_unit(&mut self) -> ParseResult<CompilationUnit> {
        let mut unit = CompilationUnit::default();

        loop {
            while self.eat_punct(';') {}
            if self.peek().is_none() {
                break;
            }

            if self.at_module_declaration() {
                trace!("Skipping module declaration");
                while !self.at_punct('{') {
                    if self.bump().is_none() {
                        return Err(self.error("'{'"));
                    }
                }
                self.skip_balanced('{', '}')?;
                continue;
            }

            let modifiers = self.modifiers()?;

            if self.eat_ident("package") {
                unit.package = Some(self.qualified_name()?);
                self.expect_punct(';')?;
            } else if self.eat_ident("import") {
                let is_static = self.eat_ident("static");
                let name = self.qualified_name()?;
                self.expect_punct(';')?;
                unit.imports.push(if is_static {
                    format!("static {}", name)
                } else {
                    name
                });
            } else {
                unit.types.extend(self.type_declaration(&modifiers)?);
            }
        }

        Ok(unit)
    }

    fn at_module_declaration(&self) -> bool {
        (self.at_ident("module") && matches!(self.peek_at(1), Some(Token::Ident(_))))
            || (self.at_ident("open") && self.peek_at(1) == Some(Token::Ident("module")))
    }

    fn at_record_declaration(&self) -> bool {
        self.at_ident("record")
            && matches!(self.peek_at(1), Some(Token::Ident(_)))
            && matches!(
                self.peek_at(2),
                Some(Token::Punct('(')) | Some(Token::Punct('<'))
            )
    }

    fn at_type_declaration(&self) -> bool {
        self.at_ident("class")
            || self.at_ident("interface")
            || self.at_ident("enum")
            || self.at_record_declaration()
            || (self.at_punct('@') && self.peek_at(1) == Some(Token::Ident("interface")))
    }

    /// Parse a type declaration after its modifiers
    ///
    /// A class or interface yields itself. Enum, record and annotation type
    /// declarations are not modeled; they yield the classes and interfaces
    /// declared inside their bodies.
    fn type_declaration(&mut self, modifiers: &[&str]) -> ParseResult<Vec<TypeDeclaration>> {
        if self.eat_ident("class") {
            return Ok(vec![self.class_or_interface(TypeKind::Class, modifiers)?]);
        }
        if self.eat_ident("interface") {
            return Ok(vec![self.class_or_interface(TypeKind::Interface, modifiers)?]);
        }
        if self.eat_ident("enum") {
            return self.enum_declaration();
        }
        if self.at_record_declaration() {
            self.bump();
            return self.record_declaration();
        }
        if self.at_punct('@') && self.peek_at(1) == Some(Token::Ident("interface")) {
            self.pos += 2;
            let name = self.expect_ident()?;
            trace!(declaration = name, "Scanning annotation type body");
            let mut container = TypeDeclaration::class(name);
            self.class_body(&mut container)?;
            return Ok(container.nested);
        }
        Err(self.error("class, interface, enum or record declaration"))
    }

    fn enum_declaration(&mut self) -> ParseResult<Vec<TypeDeclaration>> {
        let name = self.expect_ident()?;
        trace!(declaration = name, "Scanning enum body");
        if self.eat_ident("implements") {
            self.type_list()?;
        }

        let mut container = TypeDeclaration::class(name);
        self.expect_punct('{')?;

        // Constants, with their arguments and class bodies, run up to the
        // first `;` at depth zero.
        loop {
            if self.at_annotation() {
                self.annotation()?;
                continue;
            }
            match self.peek() {
                Some(Token::Punct('}')) => {
                    self.bump();
                    return Ok(container.nested);
                }
                Some(Token::Punct(';')) => {
                    self.bump();
                    break;
                }
                Some(Token::Punct('(')) => self.skip_balanced('(', ')')?,
                Some(Token::Punct('{')) => self.block(&mut container.nested)?,
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("'}'")),
            }
        }

        self.members(&mut container)?;
        Ok(container.nested)
    }

    fn record_declaration(&mut self) -> ParseResult<Vec<TypeDeclaration>> {
        let name = self.expect_ident()?;
        trace!(declaration = name, "Scanning record body");
        if self.at_punct('<') {
            self.skip_angles()?;
        }
        self.skip_balanced('(', ')')?;
        if self.eat_ident("implements") {
            self.type_list()?;
        }

        let mut container = TypeDeclaration::class(name);
        self.class_body(&mut container)?;
        Ok(container.nested)
    }

    /// Skip a `{ ... }` block, collecting the types declared in it
    ///
    /// Only a declaration at the start of a statement counts, so `Order.class`
    /// literals are never mistaken for one.
    fn block(&mut self, local: &mut Vec<TypeDeclaration>) -> ParseResult<()> {
        self.expect_punct('{')?;
        let mut depth = 1usize;
        let mut statement_start = true;
        while depth > 0 {
            if statement_start {
                let start = self.pos;
                let modifiers = self.modifiers()?;
                if self.at_type_declaration() {
                    local.extend(self.type_declaration(&modifiers)?);
                    continue;
                }
                self.pos = start;
            }
            statement_start = match self.bump() {
                Some(Token::Punct('{')) => {
                    depth += 1;
                    true
                }
                Some(Token::Punct('}')) => {
                    depth -= 1;
                    true
                }
                Some(Token::Punct(';')) => true,
                Some(_) => false,
                None => return Err(self.error("'}'")),
            };
        }
        Ok(())
    }

    fn class_or_interface(
        &mut self,
        kind: TypeKind,
        modifiers: &[&str],
    ) -> ParseResult<TypeDeclaration> {
        let name = self.expect_ident()?;
        trace!(declaration = name, %kind, ?modifiers, "Parsing type declaration");
        let mut declaration = TypeDeclaration::new(kind, name);

        if self.at_punct('<') {
            self.skip_angles()?;
        }

        loop {
            if self.eat_ident("extends") {
                declaration.extends.extend(self.type_list()?);
            } else if self.eat_ident("implements") {
                declaration.implements.extend(self.type_list()?);
            } else if self.eat_ident("permits") {
                self.type_list()?;
            } else {
                break;
            }
        }

        self.class_body(&mut declaration)?;
        Ok(declaration)
    }

    fn skip_angles(&mut self) -> ParseResult<()> {
        self.skip_balanced('<', '>')
    }

    fn type_list(&mut self) -> ParseResult<Vec<String>> {
        let mut types = vec![self.parse_type()?.text];
        while self.eat_punct(',') {
            types.push(self.parse_type()?.text);
        }
        Ok(types)
    }

    fn class_body(&mut self, declaration: &mut TypeDeclaration) -> ParseResult<()> {
        self.expect_punct('{')?;
        self.members(declaration)
    }

    /// Parse members up to and including the closing `}`
    fn members(&mut self, declaration: &mut TypeDeclaration) -> ParseResult<()> {
        while !self.eat_punct('}') {
            if self.peek().is_none() {
                return Err(self.error("'}'"));
            }
            self.member(declaration)?;
        }
        Ok(())
    }

    fn member(&mut self, declaration: &mut TypeDeclaration) -> ParseResult<()> {
        if self.eat_punct(';') {
            return Ok(());
        }
        if self.at_punct('{') {
            return self.block(&mut declaration.nested);
        }
        if self.at_ident("static") && self.peek_at(1) == Some(Token::Punct('{')) {
            self.bump();
            return self.block(&mut declaration.nested);
        }

        let modifiers = self.modifiers()?;

        if self.at_type_declaration() {
            let nested = self.type_declaration(&modifiers)?;
            declaration.nested.extend(nested);
            return Ok(());
        }

        if self.at_punct('<') {
            self.skip_angles()?;
        }

        if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(Token::Punct('('))
        {
            return self.skip_constructor(&mut declaration.nested);
        }
        // compact record constructor
        if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(Token::Punct('{'))
        {
            self.bump();
            return self.block(&mut declaration.nested);
        }

        let ty = self.parse_type()?;
        let name = self.expect_ident()?;

        if self.at_punct('(') {
            let method = self.method(name, ty, &modifiers, &mut declaration.nested)?;
            declaration.methods.push(method);
            return Ok(());
        }

        self.fields(name, ty, declaration)
    }

    fn skip_constructor(&mut self, local: &mut Vec<TypeDeclaration>) -> ParseResult<()> {
        let name = self.expect_ident()?;
        trace!(constructor = name, "Skipping constructor");
        self.skip_balanced('(', ')')?;
        if self.eat_ident("throws") {
            self.type_list()?;
        }
        self.block(local)
    }

    fn method(
        &mut self,
        name: &str,
        return_type: TypeExpr,
        modifiers: &[&str],
        local: &mut Vec<TypeDeclaration>,
    ) -> ParseResult<MethodDecl> {
        let parameters = self.parameters()?;

        let mut return_type = return_type.text;
        return_type.push_str(&self.dims());

        if self.eat_ident("throws") {
            self.type_list()?;
        }

        // annotation element default value
        if self.eat_ident("default") {
            self.skip_initializer()?;
        }

        if self.at_punct('{') {
            self.block(local)?;
        } else {
            self.expect_punct(';')?;
        }

        Ok(MethodDecl {
            name: name.to_string(),
            return_type,
            parameters,
            is_static: modifiers.contains(&"static"),
        })
    }

    fn parameters(&mut self) -> ParseResult<Vec<String>> {
        self.expect_punct('(')?;
        let mut parameters = Vec::new();
        if self.eat_punct(')') {
            return Ok(parameters);
        }

        loop {
            self.modifiers()?;
            let mut ty = self.parse_type()?.text;
            if self.at_annotation() {
                self.annotation()?;
            }
            if self.at_punct('.')
                && self.peek_at(1) == Some(Token::Punct('.'))
                && self.peek_at(2) == Some(Token::Punct('.'))
            {
                self.pos += 3;
                ty.push_str("...");
            }
            self.expect_ident()?;
            ty.push_str(&self.dims());
            parameters.push(ty);

            if !self.eat_punct(',') {
                break;
            }
        }

        self.expect_punct(')')?;
        Ok(parameters)
    }

    fn fields(
        &mut self,
        first_name: &str,
        ty: TypeExpr,
        declaration: &mut TypeDeclaration,
    ) -> ParseResult<()> {
        let mut name = first_name;
        loop {
            let dims = self.dims();
            let field_type = if dims.is_empty() {
                ty.clone()
            } else {
                TypeExpr::array(format!("{}{}", ty.text, dims))
            };
            declaration.fields.push(FieldDecl::new(name, field_type));

            if self.eat_punct('=') {
                self.skip_initializer()?;
            }

            if self.eat_punct(',') {
                name = self.expect_ident()?;
                continue;
            }
            return self.expect_punct(';');
        }
    }

    /// Skip a field initializer, stopping before the `,` or `;` that ends it
    ///
    /// A comma at bracket depth zero only ends the initializer when it is
    /// followed by another declarator (`name =`, `name,`, `name;`, `name[`),
    /// so that `new HashMap<K, V>()` is skipped whole.
    fn skip_initializer(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.error("';'")),
                Some(Token::Punct('(' | '[' | '{')) => depth += 1,
                Some(Token::Punct(')' | ']' | '}')) => {
                    if depth == 0 {
                        return Err(self.error("';'"));
                    }
                    depth -= 1;
                }
                Some(Token::Punct(';')) if depth == 0 => return Ok(()),
                Some(Token::Punct(',')) if depth == 0 && self.at_declarator(1) => return Ok(()),
                Some(_) => {}
            }
            self.pos += 1;
        }
    }

    fn at_declarator(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset), Some(Token::Ident(_)))
            && matches!(
                self.peek_at(offset + 1),
                Some(Token::Punct('=' | ',' | ';' | '['))
            )
    }

    /// Consume `[]` pairs, returning them as text
    fn dims(&mut self) -> String {
        let mut dims = String::new();
        while self.at_punct('[') && self.peek_at(1) == Some(Token::Punct(']')) {
            self.pos += 2;
            dims.push_str("[]");
        }
        dims
    }

    /// Parse a type, normalizing its text to `Name<A, B>[]` spacing
    fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        while self.at_annotation() {
            self.annotation()?;
        }

        if self.eat_punct('?') {
            let mut text = "?".to_string();
            for bound in ["extends", "super"] {
                if self.eat_ident(bound) {
                    text.push_str(&format!(" {} {}", bound, self.parse_type()?.text));
                    break;
                }
            }
            return Ok(TypeExpr::reference(text));
        }

        let name = self.expect_ident()?;
        let mut text = name.to_string();
        let mut shape = if PRIMITIVES.contains(&name) {
            TypeShape::Primitive
        } else {
            TypeShape::Reference
        };

        if shape == TypeShape::Reference {
            loop {
                if self.at_punct('<') {
                    text.push_str(&self.type_arguments()?);
                }
                let continues = self.at_punct('.')
                    && matches!(self.peek_at(1), Some(Token::Ident(_)) | Some(Token::Punct('@')));
                if !continues {
                    break;
                }
                self.bump();
                while self.at_annotation() {
                    self.annotation()?;
                }
                text.push('.');
                text.push_str(self.expect_ident()?);
            }
        }

        let dims = self.dims();
        if !dims.is_empty() {
            text.push_str(&dims);
            shape = TypeShape::Array;
        }

        Ok(TypeExpr::new(text, shape))
    }

    fn type_arguments(&mut self) -> ParseResult<String> {
        self.expect_punct('<')?;
        if self.eat_punct('>') {
            return Ok("<>".to_string());
        }

        let mut args = vec![self.parse_type()?.text];
        while self.eat_punct(',') {
            args.push(self.parse_type()?.text);
        }
        self.expect_punct('>')?;
        Ok(format!("<{}>", args.join(", ")))
    }
}
